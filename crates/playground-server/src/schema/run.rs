//! API schema types for `POST /api/run`.

use serde::Deserialize;

/// Largest accepted source body, in bytes.
pub const MAX_SOURCE_SIZE: usize = 256 * 1024;

/// Query string of `POST /api/run`.
#[derive(Debug, Default, Deserialize)]
pub struct RunQuery {
    /// `"1"` selects test mode; anything else, or absence, means a plain run.
    pub test: Option<String>,
}

impl RunQuery {
    pub fn test_mode(&self) -> bool {
        self.test.as_deref() == Some("1")
    }
}
