//! The persisted snippet payload.

use serde::{Deserialize, Serialize};

use playground_sandbox::ExecutionResult;

/// A shared piece of code, optionally with the result it produced.
///
/// Serialized with `code` first and `result` omitted when absent; that
/// encoding is the canonical form the fingerprint is computed over. Both an
/// absent `result` and `"result": null` are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExecutionResult>,
}

impl Snippet {
    pub fn new(code: impl Into<String>) -> Self {
        Snippet {
            code: code.into(),
            result: None,
        }
    }

    pub fn with_result(mut self, result: ExecutionResult) -> Self {
        self.result = Some(result);
        self
    }

    /// The exact bytes that are fingerprinted and stored.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
