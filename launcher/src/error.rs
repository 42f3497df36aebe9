//! Launch failure taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Every way an invocation can end without a child exit code to relay.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot locate launcher executable: {0:#}")]
    Locate(anyhow::Error),

    #[error("invalid launcher config: {0:#}")]
    Config(anyhow::Error),

    #[error("runtime `{runtime}` not found or not executable")]
    RuntimeNotFound { runtime: String },

    #[error("artifact not found at {}", .path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to start {}: {source}", .runtime.display())]
    Spawn {
        runtime: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("lost track of {} after it started: {source}", .runtime.display())]
    Wait {
        runtime: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("runtime terminated by signal {signal}")]
    AbnormalTermination { signal: i32 },
}

impl LaunchError {
    /// Exit code the launcher reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Locate(_) => exit_codes::LAUNCHER_NOT_LOCATED,
            LaunchError::Config(_) => exit_codes::INVALID_CONFIG,
            LaunchError::RuntimeNotFound { .. } => exit_codes::RUNTIME_NOT_FOUND,
            LaunchError::ArtifactNotFound { .. } => exit_codes::ARTIFACT_NOT_FOUND,
            LaunchError::Spawn { .. } => exit_codes::SPAWN_FAILED,
            LaunchError::Wait { .. } => exit_codes::WAIT_FAILED,
            LaunchError::AbnormalTermination { signal } => exit_codes::SIGNAL_BASE + signal,
        }
    }
}
