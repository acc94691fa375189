//! API schema types for `GET/POST /api/code`.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/code`.
#[derive(Debug, Default, Deserialize)]
pub struct LoadCodeQuery {
    /// Snippet fingerprint issued by a previous share.
    pub id: Option<String>,
}

/// Response body for `POST /api/code`.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Identifier to pass back as `GET /api/code?id=<id>`.
    pub id: String,
}
