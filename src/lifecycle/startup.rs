//! Launch orchestration.
//!
//! # Responsibilities
//! - Build the child environment (inherited + defaults)
//! - Run the install step
//! - Spawn and supervise the dev server
//!
//! # Design Decisions
//! - Fail fast: an install failure or interrupt aborts before the server
//!   starts
//! - Steps run strictly in order; there is never more than one child

use std::path::PathBuf;

use serde::Serialize;

use crate::config::env::{apply_defaults, EnvMap, InstallFlags};
use crate::config::validation::validate_config;
use crate::config::{CommandSpec, ConfigError, LauncherConfig, Overrides};
use crate::error::LaunchError;
use crate::install::{ensure_dependencies, plan_install, InstallPlan};
use crate::lifecycle::shutdown::ShutdownPolicy;
use crate::lifecycle::signals::SignalReceiver;
use crate::process::{spawn, supervise, ExitOutcome};

/// Everything the launcher is about to do, as reported by `--dry-run`.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    pub project_root: PathBuf,
    pub install: InstallPlan,
    pub server: CommandSpec,
    /// Environment keys filled in from defaults.
    pub defaulted_env: Vec<String>,
}

/// A configured launch, ready to run.
pub struct Launcher {
    config: LauncherConfig,
    flags: InstallFlags,
    env: EnvMap,
    defaulted_env: Vec<String>,
}

impl Launcher {
    /// `inherited` is the environment snapshot the children start from;
    /// configured defaults are applied to it here.
    pub fn new(config: LauncherConfig, flags: InstallFlags, mut inherited: EnvMap) -> Self {
        let defaulted_env = apply_defaults(&mut inherited, &config.env);
        Self {
            config,
            flags,
            env: inherited,
            defaulted_env,
        }
    }

    /// Layer command-line `overrides` over `config` and the install flags
    /// found in `inherited`, then re-validate the result.
    pub fn configure(
        mut config: LauncherConfig,
        overrides: &Overrides,
        inherited: EnvMap,
    ) -> Result<Self, LaunchError> {
        overrides.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        let flags = overrides.merge_flags(InstallFlags::from_env(&inherited));
        Ok(Self::new(config, flags, inherited))
    }

    pub fn flags(&self) -> InstallFlags {
        self.flags
    }

    /// Environment the installer and the server will receive.
    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    pub fn plan(&self) -> LaunchPlan {
        LaunchPlan {
            project_root: self.config.project_root.clone(),
            install: plan_install(self.flags, &self.config.install, &self.config.project_root),
            server: self.config.server.command(),
            defaulted_env: self.defaulted_env.clone(),
        }
    }

    /// The plan as pretty-printed JSON.
    pub fn plan_json(&self) -> Result<String, LaunchError> {
        Ok(serde_json::to_string_pretty(&self.plan())?)
    }

    fn policy(&self) -> ShutdownPolicy {
        ShutdownPolicy::from_config(&self.config.shutdown)
    }

    /// Install dependencies, then run the dev server until it exits.
    pub async fn run(self, signals: &mut SignalReceiver) -> Result<ExitOutcome, LaunchError> {
        let plan = self.plan();
        let root = &self.config.project_root;

        tracing::info!(
            project_root = %root.display(),
            skip_install = self.flags.skip,
            force_install = self.flags.force,
            defaulted = ?plan.defaulted_env,
            "Launch starting"
        );

        ensure_dependencies(&plan.install, root, &self.env, signals, self.policy()).await?;

        tracing::info!(command = %plan.server, "Starting dev server");
        let policy = self.policy();
        let child = spawn(&plan.server, root, &self.env, policy.process_group())?;
        let outcome = supervise(child, signals, policy).await?;

        match outcome {
            ExitOutcome::Interrupted => tracing::info!("Interrupted; shutting down"),
            _ => tracing::info!(code = outcome.exit_code(), "Dev server exited"),
        }
        Ok(outcome)
    }
}
