//! Share handlers (save and load snippets).
//!
//! Repository calls may touch SQLite, so both handlers hand them to the
//! blocking pool.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use playground_storage::Snippet;

use crate::error::{ApiError, NOT_FOUND_MESSAGE};
use crate::handlers::{request_body, run_blocking};
use crate::schema::code::{LoadCodeQuery, ShareResponse};
use crate::state::AppState;

/// Stores a `{code, result?}` snippet and returns its id.
///
/// The body is parsed as JSON whatever its content type, since the front end
/// posts it as plain text.
///
/// `POST /api/code`
pub async fn save_code(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ShareResponse>, ApiError> {
    let body = request_body(body)?;
    let snippet: Snippet = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid snippet: {}", e)))?;

    let snippets = state.snippets.clone();
    let id = run_blocking(move || snippets.put(&snippet)).await?;
    tracing::info!(id = %id, "shared snippet");
    Ok(Json(ShareResponse { id: id.to_string() }))
}

/// Streams back the exact bytes stored for a snippet id.
///
/// `GET /api/code?id={id}`
pub async fn load_code(
    State(state): State<AppState>,
    Query(query): Query<LoadCodeQuery>,
) -> Result<Response, ApiError> {
    let id = query
        .id
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    let snippets = state.snippets.clone();
    let bytes = run_blocking(move || snippets.get_raw(&id)).await?;
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
        (header::CONTENT_LENGTH, HeaderValue::from(bytes.len())),
    ];
    Ok((headers, bytes).into_response())
}
