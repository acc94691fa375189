//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse`. Caller-facing errors produce a small JSON
//! body (`{"error": "..."}`); internal errors are logged and answered with an
//! empty 500 so no detail leaks to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use playground_sandbox::SandboxError;
use playground_storage::SnippetError;

/// Message returned when a submission exceeds its size cap.
pub const TOO_LARGE_MESSAGE: &str = "Code is too large";

/// Message returned for an unknown snippet id.
pub const NOT_FOUND_MESSAGE: &str = "Code snippet was not found";

/// JSON body of a caller-facing error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Submission exceeds its size cap (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Internal server error (500). The message is logged, never sent.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "request failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        (status, axum::Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<SandboxError> for ApiError {
    fn from(err: SandboxError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<SnippetError> for ApiError {
    fn from(err: SnippetError) -> Self {
        match &err {
            SnippetError::TooLarge { size, limit } => {
                tracing::debug!(size, limit, "rejected oversized snippet");
                ApiError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string())
            }
            SnippetError::NotFound(_) => ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            SnippetError::Serialization(_) | SnippetError::Storage(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn client_errors_carry_json_message() {
        let response = ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_text(response).await,
            r#"{"error":"Code snippet was not found"}"#
        );
    }

    #[tokio::test]
    async fn internal_errors_have_empty_body() {
        let response =
            ApiError::InternalError("database is locked at /var/db".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "");
    }

    #[test]
    fn snippet_errors_map_to_statuses() {
        let too_large: ApiError = SnippetError::TooLarge { size: 10, limit: 5 }.into();
        assert!(matches!(too_large, ApiError::PayloadTooLarge(ref m) if m == TOO_LARGE_MESSAGE));

        let missing: ApiError = SnippetError::NotFound("abc".to_string()).into();
        assert!(matches!(missing, ApiError::NotFound(ref m) if m == NOT_FOUND_MESSAGE));

        let storage: ApiError =
            SnippetError::Storage(playground_storage::StorageError::LockPoisoned).into();
        assert!(matches!(storage, ApiError::InternalError(_)));
    }

    #[test]
    fn sandbox_errors_are_internal() {
        let err: ApiError = SandboxError::WorkspaceAlloc(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no space left on device",
        ))
        .into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
