//! Router assembly for the playground HTTP API.
//!
//! [`build_router`] wires the handler functions to their routes with a body
//! size limit plus CORS and tracing middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::schema::MAX_REQUEST_BODY;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Paths match the ones the browser front end already calls. Unsupported
/// methods on a known path get axum's empty 405.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Execute
        .route("/api/run", post(handlers::run::run_code))
        // Share
        .route(
            "/api/code",
            get(handlers::code::load_code).post(handlers::code::save_code),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
