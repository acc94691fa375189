//! Isolated execution of untrusted Alumina source for the playground.
//!
//! This crate owns the lifecycle of a single run: a throwaway directory, the
//! toolchain subprocess, and the classification of what it left behind.
//!
//! # Modules
//!
//! - [`workspace`] -- Per-run scratch directories with guaranteed removal
//! - [`controller`] -- Toolchain invocation and artifact collection
//! - [`result`] -- [`ExecutionResult`] and its base64 JSON wire form
//! - [`error`] -- Infrastructure failure modes

pub mod controller;
pub mod error;
mod process;
pub mod result;
pub mod workspace;

pub use controller::{Execution, ExecutionController};
pub use error::SandboxError;
pub use result::{ExecutionResult, ResultDecodeError};
pub use workspace::{Cleanup, Workspace};

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Location of the run script relative to the project root.
pub const RUN_SCRIPT: &str = "scripts/run.sh";

/// Wall-clock bound on one toolchain invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an [`ExecutionController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Executable invoked once per run, with the workspace as working
    /// directory and no arguments.
    pub run_script: PathBuf,

    /// Upper bound on toolchain wall-clock time.
    pub timeout: Duration,

    /// Parent directory for workspaces.
    /// `None` means the OS temp directory.
    pub workspace_root: Option<PathBuf>,
}

impl ExecutorConfig {
    /// Config that invokes `run_script` with the default timeout.
    pub fn new(run_script: impl Into<PathBuf>) -> Self {
        ExecutorConfig {
            run_script: run_script.into(),
            timeout: DEFAULT_TIMEOUT,
            workspace_root: None,
        }
    }

    /// Config that invokes `<root>/scripts/run.sh`.
    pub fn for_project_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(RUN_SCRIPT))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }
}
