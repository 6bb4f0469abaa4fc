//! Deciding whether and how to install dependencies.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{CommandSpec, InstallConfig, InstallFlags};

/// Why the install step was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `SKIP_INSTALL` (or `--skip-install`) was set.
    Disabled,
    /// The dependency directory exists and no reinstall was forced.
    AlreadyPresent,
}

/// The install step, fully resolved against the project on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InstallPlan {
    Skip {
        reason: SkipReason,
    },
    /// Dependencies are missing; run the installer.
    Install {
        command: CommandSpec,
    },
    /// Remove `dependency_dir`, then run the installer.
    Reinstall {
        dependency_dir: PathBuf,
        command: CommandSpec,
    },
}

impl InstallPlan {
    pub fn command(&self) -> Option<&CommandSpec> {
        match self {
            InstallPlan::Skip { .. } => None,
            InstallPlan::Install { command } | InstallPlan::Reinstall { command, .. } => {
                Some(command)
            }
        }
    }
}

/// Resolve the install step. Touches the filesystem only to test for the
/// dependency directory and the lockfile.
pub fn plan_install(flags: InstallFlags, config: &InstallConfig, project_root: &Path) -> InstallPlan {
    if flags.skip {
        return InstallPlan::Skip {
            reason: SkipReason::Disabled,
        };
    }

    let command = install_command(config, project_root);
    let dependency_dir = project_root.join(&config.dependency_dir);

    if dependency_dir.exists() {
        if flags.force {
            InstallPlan::Reinstall {
                dependency_dir,
                command,
            }
        } else {
            InstallPlan::Skip {
                reason: SkipReason::AlreadyPresent,
            }
        }
    } else {
        InstallPlan::Install { command }
    }
}

/// Locked (`npm ci`) when a lockfile exists, otherwise unlocked
/// (`npm install`).
pub fn install_command(config: &InstallConfig, project_root: &Path) -> CommandSpec {
    let args = if project_root.join(&config.lockfile).exists() {
        &config.locked_args
    } else {
        &config.unlocked_args
    };
    CommandSpec::new(config.program.clone(), args.iter().cloned())
}
