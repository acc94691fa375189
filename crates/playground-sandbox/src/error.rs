//! Sandbox error types covering infrastructure failures of a run.

use std::io;
use std::path::PathBuf;

/// Errors that abort an execution request.
///
/// A program that fails to compile is not an error: it is reported as
/// [`ExecutionResult::CompileFailed`](crate::ExecutionResult::CompileFailed).
/// Every variant here is an infrastructure problem the caller cannot fix by
/// changing its source text.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The per-run directory could not be created.
    #[error("failed to allocate workspace: {0}")]
    WorkspaceAlloc(#[source] io::Error),

    /// The source artifact could not be written into the workspace.
    #[error("failed to write source artifact: {0}")]
    WriteSource(#[source] io::Error),

    /// The toolchain command could not be started.
    #[error("failed to launch toolchain {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on the toolchain process failed.
    #[error("failed to wait for toolchain: {0}")]
    Wait(#[source] io::Error),

    /// A required artifact was missing or unreadable after a successful run.
    #[error("failed to read artifact {name}: {source}")]
    ReadArtifact {
        name: &'static str,
        #[source]
        source: io::Error,
    },

    /// The exit status artifact did not hold a decimal integer.
    #[error("invalid exit status in {name}: {value:?}")]
    InvalidExitStatus { name: &'static str, value: String },
}
