//! Login gate route: `POST /api/login`
//!
//! Checks credentials against the configured authenticator and tells the
//! client which role it holds and where to go next. The server keeps no
//! session; the client stores the role.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, warn};

use vms_core::auth::{Credentials, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the login router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/login", post(login))
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub email: String,
    pub role: Role,
    pub redirect: &'static str,
}

async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(credentials) = body?;

    let session = state
        .authenticator
        .authenticate(&credentials)
        .await
        .inspect_err(|e| warn!(reason = %e, "login rejected"))?;

    info!(email = %session.email, role = %session.role, "login accepted");

    Ok(Json(LoginResponse {
        ok: true,
        redirect: session.role.landing_path(),
        email: session.email,
        role: session.role,
    }))
}
