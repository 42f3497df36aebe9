//! Resolve, check, spawn, relay.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument, warn};

use crate::error::LaunchError;
use crate::invocation::Invocation;
use crate::process::{ChildFailure, Termination, run_inherited, termination};

/// Run the invocation to completion and return the child's exit code.
///
/// The runtime is resolved before the artifact is looked at, so a missing
/// runtime never touches the artifact. Never exits the process.
#[instrument(skip_all, fields(runtime = %invocation.runtime.display(), artifact = %invocation.artifact.display()))]
pub fn launch(invocation: &Invocation) -> Result<i32, LaunchError> {
    let runtime = resolve_runtime(&invocation.runtime)?;
    ensure_artifact(&invocation.artifact)?;

    let cmd = runtime_command(&runtime, invocation);
    info!(
        runtime = %runtime.display(),
        user_args = invocation.user_args.len(),
        "starting runtime"
    );

    let status = run_inherited(cmd).map_err(|failure| child_error(failure, &runtime))?;

    match termination(status) {
        Termination::Exited(code) => {
            debug!(code, "runtime exited");
            Ok(code)
        }
        Termination::Signaled(signal) => {
            warn!(signal, "runtime terminated by signal");
            Err(LaunchError::AbnormalTermination { signal })
        }
    }
}

/// Resolve the runtime through the executable search path.
pub fn resolve_runtime(runtime: &Path) -> Result<PathBuf, LaunchError> {
    which::which(runtime).map_err(|err| {
        debug!(err = %err, "runtime lookup failed");
        LaunchError::RuntimeNotFound {
            runtime: runtime.display().to_string(),
        }
    })
}

/// Command for the resolved runtime. On unix the child's `argv[0]` stays the
/// name from the config (`java`), not the resolved path.
fn runtime_command(resolved: &Path, invocation: &Invocation) -> Command {
    let mut cmd = Command::new(resolved);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        cmd.arg0(&invocation.runtime);
    }
    cmd.args(invocation.argv());
    cmd
}

fn child_error(failure: ChildFailure, runtime: &Path) -> LaunchError {
    let runtime = runtime.to_path_buf();
    match failure {
        ChildFailure::Spawn(source) => LaunchError::Spawn { runtime, source },
        ChildFailure::Wait(source) => LaunchError::Wait { runtime, source },
    }
}

fn ensure_artifact(path: &Path) -> Result<(), LaunchError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(LaunchError::ArtifactNotFound {
            path: path.to_path_buf(),
        }),
    }
}
