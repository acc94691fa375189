//! HTTP handler modules for the playground API.
//!
//! Each sub-module implements thin handlers that validate size, decode the
//! request, delegate to the execution controller or snippet repository, and
//! encode the response. No business logic lives in handlers.

pub mod code;
pub mod run;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;

use crate::error::{ApiError, TOO_LARGE_MESSAGE};

/// Unwraps a buffered request body, so that bodies over the router's limit
/// get the same `413` JSON error as the per-endpoint size checks.
pub(crate) fn request_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    })
}

/// Runs a synchronous storage call on the blocking pool, keeping SQLite I/O
/// and connection-lock waits off the async worker threads.
pub(crate) async fn run_blocking<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("storage task failed: {}", e)))?
        .map_err(Into::into)
}
