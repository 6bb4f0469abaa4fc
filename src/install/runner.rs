//! Executing an [`InstallPlan`].

use std::path::Path;

use crate::config::EnvMap;
use crate::error::LaunchError;
use crate::install::plan::{InstallPlan, SkipReason};
use crate::lifecycle::shutdown::ShutdownPolicy;
use crate::lifecycle::signals::SignalReceiver;
use crate::process::{spawn, supervise, ExitOutcome};

/// Carry out `plan` in `project_root`. The installer is supervised like
/// the server: signals are relayed to it, and an interrupt aborts the
/// launch.
pub async fn ensure_dependencies(
    plan: &InstallPlan,
    project_root: &Path,
    env: &EnvMap,
    signals: &mut SignalReceiver,
    policy: ShutdownPolicy,
) -> Result<(), LaunchError> {
    let command = match plan {
        InstallPlan::Skip {
            reason: SkipReason::Disabled,
        } => {
            tracing::info!("Dependency install disabled; skipping");
            return Ok(());
        }
        InstallPlan::Skip {
            reason: SkipReason::AlreadyPresent,
        } => {
            tracing::info!(
                "Dependencies present; skipping install (set FORCE_INSTALL=1 or pass --force-install to reinstall)"
            );
            return Ok(());
        }
        InstallPlan::Reinstall {
            dependency_dir,
            command,
        } => {
            tracing::info!(
                path = %dependency_dir.display(),
                "Forced reinstall; removing existing dependencies"
            );
            remove_dependencies(dependency_dir).await?;
            command
        }
        InstallPlan::Install { command } => command,
    };

    tracing::info!(command = %command, "Installing dependencies");
    let child = spawn(command, project_root, env, policy.process_group())?;

    match supervise(child, signals, policy).await? {
        outcome if outcome.is_success() => {
            tracing::info!("Dependencies installed");
            Ok(())
        }
        ExitOutcome::Interrupted => Err(LaunchError::Interrupted),
        outcome => {
            let code = outcome.exit_code();
            tracing::error!(code, "Dependency install failed");
            Err(LaunchError::InstallFailed { code })
        }
    }
}

async fn remove_dependencies(path: &Path) -> Result<(), LaunchError> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        // Vanished between planning and removal; nothing to clean up.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(LaunchError::RemoveDependencies {
            path: path.to_path_buf(),
            source,
        }),
    }
}
