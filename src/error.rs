//! Launcher error type and its mapping onto process exit codes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Conventional exit code for a process stopped by SIGINT (128 + 2).
pub const EXIT_INTERRUPTED: i32 = 130;
/// Exit code for an invalid configuration or command line.
pub const EXIT_CONFIG: i32 = 2;
/// Shell convention: command found but could not be executed.
pub const EXIT_CANNOT_EXECUTE: i32 = 126;
/// Shell convention: command not found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Errors that abort a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The package manager exited unsuccessfully.
    #[error("dependency install failed with exit code {code}")]
    InstallFailed { code: i32 },

    /// SIGINT arrived before the supervised child finished.
    #[error("interrupted")]
    Interrupted,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    RemoveDependencies {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render launch plan: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LaunchError {
    /// The exit code the launcher terminates with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Config(_) => EXIT_CONFIG,
            LaunchError::InstallFailed { code } => *code,
            LaunchError::Interrupted => EXIT_INTERRUPTED,
            LaunchError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                EXIT_NOT_FOUND
            }
            LaunchError::Spawn { .. } => EXIT_CANNOT_EXECUTE,
            LaunchError::RemoveDependencies { .. } | LaunchError::Render(_) | LaunchError::Io(_) => 1,
        }
    }
}
