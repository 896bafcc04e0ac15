//! Hero configuration routes: `/api/hero/*`
//!
//! Read and save the hero document, upload images for it, and stream
//! change notifications to open pages.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{Stream, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info};

use vms_core::error::UploadError;
use vms_core::notify::{HERO_UPDATED, HeroChanged};
use vms_core::upload::UploadPolicy;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Headroom over the upload limit for the multipart envelope. Bodies past
/// the limit are still read far enough to report a size error instead of a
/// bare 413.
const ENVELOPE_BYTES: u64 = 1024 * 1024;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// Build the `/api/hero` router.
pub fn router(policy: UploadPolicy) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/hero", get(get_hero).post(save_hero))
        .route(
            "/api/hero/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit(policy))),
        )
        .route("/api/hero/events", get(hero_events))
}

fn body_limit(policy: UploadPolicy) -> usize {
    let limit = policy
        .max_bytes
        .saturating_mul(2)
        .saturating_add(ENVELOPE_BYTES);
    usize::try_from(limit).unwrap_or(usize::MAX)
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    pub src: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Return the normalized hero document. Never fails.
async fn get_hero(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = state.store.load().await;
    ([(header::CACHE_CONTROL, "no-store")], Json(config))
}

/// Merge the posted fields onto the stored document.
async fn save_hero(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(patch) = body?;
    let saved = state.store.save(&patch).await?;

    let listeners = state.notifier.publish(HeroChanged::now());
    info!(
        slides = saved.slides.len(),
        listeners, "hero config updated"
    );

    Ok(Json(SaveResponse { ok: true }))
}

/// Accept one image in the multipart field `file`.
///
/// The declared type is checked before any payload is read, so a non-image
/// is rejected as such whatever its size. The payload is then read until it
/// completes or exceeds the limit.
async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart?;
    let policy = state.uploads.policy();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(policy, e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();
        policy.check_type(&content_type)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(|e| read_error(policy, e))? {
            bytes.extend_from_slice(&chunk);
            policy.check_size(bytes.len() as u64)?;
        }

        let stored = state
            .uploads
            .save(&original_name, &content_type, &bytes)
            .await?;

        return Ok((
            [(header::CACHE_CONTROL, "no-store")],
            Json(UploadResponse {
                ok: true,
                src: stored.src,
            }),
        ));
    }

    Err(UploadError::MissingFile.into())
}

fn read_error(policy: UploadPolicy, err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge {
            size: body_limit(policy) as u64,
            max_bytes: policy.max_bytes,
        }
        .into()
    } else {
        err.into()
    }
}

/// Server-sent `hero-updated` events, one per committed save.
async fn hero_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.notifier.subscribe()).map(|result| {
        let changed = result.unwrap_or_else(|lagged| {
            // Missed events collapse into one refetch.
            debug!(error = %lagged, "change stream subscriber lagged");
            HeroChanged::now()
        });
        Ok(hero_updated_event(changed))
    })
    .take_until(state.shutdown_signal());

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}

fn hero_updated_event(changed: HeroChanged) -> Event {
    Event::default()
        .event(HERO_UPDATED)
        .data(changed.updated_at_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_leaves_room_past_policy() {
        let policy = UploadPolicy { max_bytes: 5 };
        assert_eq!(body_limit(policy), 10 + 1024 * 1024);
    }
}
