//! Per-run scratch directories with guaranteed removal.
//!
//! A [`Workspace`] is created for exactly one execution and owned by it. It
//! leaves the process in one of two ways:
//!
//! - [`Workspace::release`] moves the directory into a blocking task that
//!   deletes it in the background and hands back a [`Cleanup`] handle, so the
//!   caller can return its result without waiting on the filesystem.
//! - Dropping the workspace (early return, panic unwinding) deletes the
//!   directory synchronously through the inner [`TempDir`] guard.
//!
//! The directory handle is moved in both paths, so removal runs exactly once.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Name prefix for every workspace directory.
pub const WORKSPACE_PREFIX: &str = "alu-run-";

/// An exclusively owned, uniquely named directory for one run.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh workspace under `root`, or under the OS temp
    /// directory when `root` is `None`.
    pub fn acquire(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Workspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of an artifact inside the workspace.
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `contents` to the named artifact, replacing any previous file.
    pub async fn write_artifact(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.artifact(name), contents).await
    }

    /// Reads the named artifact in full.
    pub async fn read_artifact(&self, name: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.artifact(name)).await
    }

    /// Reads the named artifact, treating a missing file as empty.
    pub async fn read_artifact_or_empty(&self, name: &str) -> io::Result<Vec<u8>> {
        match self.read_artifact(name).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Schedules removal of the workspace and returns immediately.
    ///
    /// Must be called from within a Tokio runtime. Removal failures are
    /// logged and never reported to the caller.
    pub fn release(self) -> Cleanup {
        let path = self.dir.path().to_path_buf();
        let dir = self.dir;
        let handle = tokio::task::spawn_blocking(move || {
            let path = dir.path().to_path_buf();
            if let Err(err) = dir.close() {
                tracing::warn!(workspace = %path.display(), error = %err, "failed to remove workspace");
            }
        });
        Cleanup { path, handle }
    }
}

/// Handle on a pending workspace removal.
///
/// Dropping the handle detaches the task; the removal still runs.
#[derive(Debug)]
pub struct Cleanup {
    path: PathBuf,
    handle: JoinHandle<()>,
}

impl Cleanup {
    /// Path of the workspace being removed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Waits until the removal task has finished.
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            tracing::warn!(workspace = %self.path.display(), error = %err, "workspace cleanup task failed");
        }
    }
}
