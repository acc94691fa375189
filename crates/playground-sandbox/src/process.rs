//! Process-group supervision for the toolchain subprocess.
//!
//! The run script is spawned as the leader of a fresh process group, so the
//! compiler and the compiled program it starts inherit the script's group id.
//! Signalling the group reaches every one of them, including processes
//! orphaned by the script's own exit, unless they moved to another group.

use tokio::process::{Child, Command};

/// Makes the spawned process the leader of a new process group.
pub(crate) fn isolate(command: &mut Command) {
    #[cfg(unix)]
    command.process_group(0);
    #[cfg(not(unix))]
    let _ = command;
}

/// Kills the toolchain's whole process group when dropped.
///
/// Declared after the [`Child`] it guards so it drops first: descendants die
/// before `kill_on_drop` reaps the leader.
#[derive(Debug)]
pub(crate) struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    /// Guards the group led by `child`. Must be called before the child is
    /// waited on, while its pid is still known.
    pub(crate) fn of(child: &Child) -> Self {
        ProcessGroup { pgid: child.id() }
    }

    /// Sends `SIGKILL` to every process in the group. Later calls are no-ops.
    pub(crate) fn kill(&mut self) {
        if let Some(pgid) = self.pgid.take() {
            kill_group(pgid);
        }
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(unix)]
fn kill_group(pgid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pgid) else {
        tracing::warn!(pgid, "process group id out of range");
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => tracing::debug!(pgid, "killed toolchain process group"),
        // Every member has already exited.
        Err(Errno::ESRCH) => {}
        Err(err) => {
            tracing::warn!(pgid, error = %err, "failed to kill toolchain process group")
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_pgid: u32) {}
