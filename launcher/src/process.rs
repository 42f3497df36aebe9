//! Running a child process attached to the launcher's own terminal.

use std::io;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, error, instrument};

use crate::signals::InterruptGuard;

/// How the child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with this code.
    Exited(i32),
    /// Killed by this signal number.
    Signaled(i32),
}

/// Which half of running the child went wrong.
#[derive(Debug)]
pub enum ChildFailure {
    /// The OS refused to create the process.
    Spawn(io::Error),
    /// The process started but its exit status could not be collected.
    Wait(io::Error),
}

/// Spawn `cmd` with stdin/stdout/stderr inherited and block until it exits.
///
/// Nothing is piped or buffered by the launcher; the child talks to the same
/// streams the launcher was given. There is no timeout. Interrupts are
/// ignored from before the spawn until the child has been reaped.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_inherited(mut cmd: Command) -> Result<ExitStatus, ChildFailure> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let interrupts = InterruptGuard::ignore();
    interrupts.restore_in_child(&mut cmd);

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(ChildFailure::Spawn(e));
        }
    };

    let status = match child.wait() {
        Ok(status) => status,
        Err(e) => {
            error!(err = %e, "failed to wait for command");
            return Err(ChildFailure::Wait(e));
        }
    };
    drop(interrupts);

    debug!(exit_code = ?status.code(), "command finished");
    Ok(status)
}

/// Classify an exit status.
pub fn termination(status: ExitStatus) -> Termination {
    match status.code() {
        Some(code) => Termination::Exited(code),
        None => Termination::Signaled(signal_of(status)),
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status.signal().unwrap_or(0)
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> i32 {
    0
}
