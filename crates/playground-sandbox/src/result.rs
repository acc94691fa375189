//! The outcome of a single run and its JSON wire form.
//!
//! [`ExecutionResult`] keeps the "compile failure carries no exit code and no
//! program output" rule in the type itself. On the wire it is flattened into
//! the object shape existing clients expect:
//!
//! ```json
//! {"success": true, "exit_code": 0, "compiler_output": "", "output": "aGkK"}
//! ```
//!
//! Diagnostics and program output are opaque bytes and travel as standard
//! padded base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Result of handing one source text to the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireResult", into = "WireResult")]
pub enum ExecutionResult {
    /// The toolchain could not produce a runnable program.
    CompileFailed {
        /// Diagnostics emitted by the compiler (possibly empty).
        compiler_output: Vec<u8>,
    },
    /// The program compiled and ran to completion.
    Completed {
        /// Exit code of the user program.
        exit_code: i32,
        /// Compiler diagnostics, typically warnings (possibly empty).
        compiler_output: Vec<u8>,
        /// Captured stdout of the user program.
        program_output: Vec<u8>,
    },
}

impl ExecutionResult {
    /// Returns `true` if the program compiled and ran.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Completed { .. })
    }

    /// Exit code of the user program, if it ran.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionResult::Completed { exit_code, .. } => Some(*exit_code),
            ExecutionResult::CompileFailed { .. } => None,
        }
    }

    pub fn compiler_output(&self) -> &[u8] {
        match self {
            ExecutionResult::CompileFailed { compiler_output }
            | ExecutionResult::Completed {
                compiler_output, ..
            } => compiler_output,
        }
    }

    /// Captured program stdout, if the program ran.
    pub fn program_output(&self) -> Option<&[u8]> {
        match self {
            ExecutionResult::Completed { program_output, .. } => Some(program_output),
            ExecutionResult::CompileFailed { .. } => None,
        }
    }
}

/// Errors produced when a wire object violates the result invariants.
#[derive(Debug, thiserror::Error)]
pub enum ResultDecodeError {
    /// A failed compile carried a field only a completed run may have.
    #[error("unsuccessful result must not carry `{0}`")]
    UnexpectedField(&'static str),

    /// A successful result had no exit code.
    #[error("successful result is missing `exit_code`")]
    MissingExitCode,

    /// A binary field was not valid base64.
    #[error("`{field}` is not valid base64: {source}")]
    Base64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },
}

/// Flat JSON shape shared with the browser front end.
#[derive(Debug, Serialize, Deserialize)]
struct WireResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compiler_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

fn decode_field(field: &'static str, value: Option<String>) -> Result<Vec<u8>, ResultDecodeError> {
    match value {
        Some(text) => STANDARD
            .decode(text.as_bytes())
            .map_err(|source| ResultDecodeError::Base64 { field, source }),
        None => Ok(Vec::new()),
    }
}

impl TryFrom<WireResult> for ExecutionResult {
    type Error = ResultDecodeError;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        if wire.success {
            let exit_code = wire.exit_code.ok_or(ResultDecodeError::MissingExitCode)?;
            Ok(ExecutionResult::Completed {
                exit_code,
                compiler_output: decode_field("compiler_output", wire.compiler_output)?,
                program_output: decode_field("output", wire.output)?,
            })
        } else {
            if wire.exit_code.is_some() {
                return Err(ResultDecodeError::UnexpectedField("exit_code"));
            }
            if wire.output.is_some() {
                return Err(ResultDecodeError::UnexpectedField("output"));
            }
            Ok(ExecutionResult::CompileFailed {
                compiler_output: decode_field("compiler_output", wire.compiler_output)?,
            })
        }
    }
}

impl From<ExecutionResult> for WireResult {
    fn from(result: ExecutionResult) -> Self {
        match result {
            ExecutionResult::CompileFailed { compiler_output } => WireResult {
                success: false,
                exit_code: None,
                compiler_output: Some(STANDARD.encode(compiler_output)),
                output: None,
            },
            ExecutionResult::Completed {
                exit_code,
                compiler_output,
                program_output,
            } => WireResult {
                success: true,
                exit_code: Some(exit_code),
                compiler_output: Some(STANDARD.encode(compiler_output)),
                output: Some(STANDARD.encode(program_output)),
            },
        }
    }
}
