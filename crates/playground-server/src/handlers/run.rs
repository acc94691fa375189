//! Execute handler.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::Json;

use playground_sandbox::ExecutionResult;

use crate::error::{ApiError, TOO_LARGE_MESSAGE};
use crate::handlers::request_body;
use crate::schema::run::{RunQuery, MAX_SOURCE_SIZE};
use crate::state::AppState;

/// Compiles and runs the raw source text in the request body.
///
/// A compile failure is a normal `200` response with `success: false`; only
/// oversized input and infrastructure failures produce error statuses.
///
/// `POST /api/run?test=1`
pub async fn run_code(
    State(state): State<AppState>,
    Query(query): Query<RunQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExecutionResult>, ApiError> {
    let body = request_body(body)?;
    if body.len() > MAX_SOURCE_SIZE {
        tracing::debug!(size = body.len(), limit = MAX_SOURCE_SIZE, "rejected oversized source");
        return Err(ApiError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string()));
    }

    let code = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("source must be valid UTF-8".to_string()))?;

    let result = state.controller.run(code, query.test_mode()).await?;
    Ok(Json(result))
}
