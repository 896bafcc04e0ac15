//! HTTP error types for the VMS server.
//!
//! Maps domain errors from `vms-core` into HTTP responses. Every error
//! produces `{ "ok": false, "error": "<message>" }`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use vms_core::error::{AuthError, StoreError, UploadError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Client sent invalid input.
    BadRequest(String),
    /// Credentials were rejected.
    Unauthorized(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorBody { ok: false, error };

        (status, axum::Json(body)).into_response()
    }
}

// A failed config write is reported as a bad request, matching the
// `{ok:false}` contract of the config endpoint.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::warn!(error = %err, "hero config save failed");
        Self::BadRequest(err.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        if err.is_rejection() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields => Self::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}
