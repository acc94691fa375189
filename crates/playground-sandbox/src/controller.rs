//! Runs untrusted source through the external toolchain.
//!
//! The pipeline for one request:
//! 1. Acquire a fresh [`Workspace`]
//! 2. Write the source to [`SOURCE_ARTIFACT`]
//! 3. Spawn the run script with the workspace as its working directory,
//!    adding [`TEST_MODE_VAR`] to the inherited environment in test mode
//! 4. Wait for it, bounded by the configured timeout; on expiry kill its
//!    whole process group, so the compiler and user program die with it
//! 5. Non-zero exit: report a compile failure with the diagnostics artifact
//! 6. Zero exit: read status, diagnostics and output artifacts
//! 7. Kill any processes the script left behind, then release the workspace
//!    in the background
//!
//! The run script is the isolation boundary; nothing user-supplied executes
//! in this process.

use std::process::Stdio;
use std::time::Instant;

use tokio::process::Command;

use crate::error::SandboxError;
use crate::process::{self, ProcessGroup};
use crate::result::ExecutionResult;
use crate::workspace::{Cleanup, Workspace};
use crate::ExecutorConfig;

/// Source file handed to the toolchain.
pub const SOURCE_ARTIFACT: &str = "program.alu";
/// Compiler diagnostics, written on both success and failure.
pub const DIAGNOSTICS_ARTIFACT: &str = "compiler.output";
/// Decimal exit code of the user program, written only on successful compile.
pub const STATUS_ARTIFACT: &str = "program.ret";
/// Captured stdout of the user program, written only on successful compile.
pub const OUTPUT_ARTIFACT: &str = "program.output";
/// Environment variable that switches the toolchain into test mode.
pub const TEST_MODE_VAR: &str = "TEST";

/// A finished run together with its pending workspace removal.
#[derive(Debug)]
pub struct Execution {
    pub result: ExecutionResult,
    pub cleanup: Cleanup,
}

/// Stateless coordinator for untrusted-code runs.
///
/// Holds only configuration, so a single controller can be shared across
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct ExecutionController {
    config: ExecutorConfig,
}

impl ExecutionController {
    pub fn new(config: ExecutorConfig) -> Self {
        ExecutionController { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Compiles and runs `code`, returning the classified outcome.
    ///
    /// The workspace is released in the background before this returns.
    pub async fn run(&self, code: &str, test_mode: bool) -> Result<ExecutionResult, SandboxError> {
        let execution = self.run_tracked(code, test_mode).await?;
        Ok(execution.result)
    }

    /// Like [`run`](Self::run), but also returns the cleanup handle so the
    /// caller can observe when the workspace is gone.
    pub async fn run_tracked(&self, code: &str, test_mode: bool) -> Result<Execution, SandboxError> {
        let workspace = Workspace::acquire(self.config.workspace_root.as_deref())
            .map_err(SandboxError::WorkspaceAlloc)?;
        let start = Instant::now();
        tracing::debug!(
            workspace = %workspace.path().display(),
            test_mode,
            source_len = code.len(),
            "starting execution"
        );

        let outcome = self.execute(&workspace, code, test_mode).await;
        let cleanup = workspace.release();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    success = result.is_success(),
                    exit_code = ?result.exit_code(),
                    test_mode,
                    elapsed_ms,
                    "execution finished"
                );
                Ok(Execution { result, cleanup })
            }
            Err(err) => {
                tracing::error!(error = %err, elapsed_ms, "execution failed");
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        workspace: &Workspace,
        code: &str,
        test_mode: bool,
    ) -> Result<ExecutionResult, SandboxError> {
        workspace
            .write_artifact(SOURCE_ARTIFACT, code.as_bytes())
            .await
            .map_err(SandboxError::WriteSource)?;

        let mut command = Command::new(&self.config.run_script);
        command
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if test_mode {
            command.env(TEST_MODE_VAR, "1");
        }
        process::isolate(&mut command);

        let mut child = command.spawn().map_err(|source| SandboxError::Spawn {
            path: self.config.run_script.clone(),
            source,
        })?;
        // Anything the script left running dies when this goes out of scope.
        let mut group = ProcessGroup::of(&child);

        let waited = tokio::time::timeout(self.config.timeout, child.wait()).await;
        match waited {
            Ok(status) => {
                let status = status.map_err(SandboxError::Wait)?;
                if status.success() {
                    collect_completed(workspace).await
                } else {
                    tracing::debug!(%status, "toolchain reported failure");
                    Ok(ExecutionResult::CompileFailed {
                        compiler_output: read_diagnostics(workspace).await?,
                    })
                }
            }
            Err(_) => {
                tracing::warn!(
                    timeout = ?self.config.timeout,
                    workspace = %workspace.path().display(),
                    "toolchain exceeded time limit, killing"
                );
                group.kill();
                if let Err(err) = child.kill().await {
                    tracing::warn!(error = %err, "failed to kill toolchain process");
                }
                let mut compiler_output = read_diagnostics(workspace).await?;
                if !compiler_output.is_empty() && !compiler_output.ends_with(b"\n") {
                    compiler_output.push(b'\n');
                }
                compiler_output.extend_from_slice(
                    format!(
                        "playground: execution timed out after {:?}\n",
                        self.config.timeout
                    )
                    .as_bytes(),
                );
                Ok(ExecutionResult::CompileFailed { compiler_output })
            }
        }
    }
}

/// Diagnostics after an unsuccessful run. The toolchain may have died before
/// writing them, so a missing file reads as empty.
async fn read_diagnostics(workspace: &Workspace) -> Result<Vec<u8>, SandboxError> {
    workspace
        .read_artifact_or_empty(DIAGNOSTICS_ARTIFACT)
        .await
        .map_err(|source| SandboxError::ReadArtifact {
            name: DIAGNOSTICS_ARTIFACT,
            source,
        })
}

async fn read_required(workspace: &Workspace, name: &'static str) -> Result<Vec<u8>, SandboxError> {
    workspace
        .read_artifact(name)
        .await
        .map_err(|source| SandboxError::ReadArtifact { name, source })
}

async fn collect_completed(workspace: &Workspace) -> Result<ExecutionResult, SandboxError> {
    let status = read_required(workspace, STATUS_ARTIFACT).await?;
    let exit_code = parse_exit_status(&status)?;
    let compiler_output = read_required(workspace, DIAGNOSTICS_ARTIFACT).await?;
    let program_output = read_required(workspace, OUTPUT_ARTIFACT).await?;

    Ok(ExecutionResult::Completed {
        exit_code,
        compiler_output,
        program_output,
    })
}

fn parse_exit_status(raw: &[u8]) -> Result<i32, SandboxError> {
    let text = String::from_utf8_lossy(raw);
    text.trim()
        .parse::<i32>()
        .map_err(|_| SandboxError::InvalidExitStatus {
            name: STATUS_ARTIFACT,
            value: text.into_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal_status() {
        assert_eq!(parse_exit_status(b"0").unwrap(), 0);
        assert_eq!(parse_exit_status(b"42\n").unwrap(), 42);
        assert_eq!(parse_exit_status(b"  -1 \r\n").unwrap(), -1);
    }

    #[test]
    fn rejects_non_numeric_status() {
        for raw in [&b""[..], b"abc", b"1.5", b"0x10"] {
            let err = parse_exit_status(raw).unwrap_err();
            assert!(
                matches!(err, SandboxError::InvalidExitStatus { name: STATUS_ARTIFACT, .. }),
                "{err:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_run_script_is_internal_error() {
        let root = tempfile::tempdir().unwrap();
        let controller = ExecutionController::new(
            ExecutorConfig::new(root.path().join("no-such-script.sh"))
                .with_workspace_root(root.path()),
        );
        let err = controller.run("fn main() {}", false).await.unwrap_err();
        assert!(matches!(err, SandboxError::Spawn { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unusable_workspace_root_is_internal_error() {
        let root = tempfile::tempdir().unwrap();
        let controller = ExecutionController::new(
            ExecutorConfig::new("/bin/true").with_workspace_root(root.path().join("missing")),
        );
        let err = controller.run("fn main() {}", false).await.unwrap_err();
        assert!(matches!(err, SandboxError::WorkspaceAlloc(_)), "{err:?}");
    }
}
