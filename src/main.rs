//! Development server launcher.
//!
//! # Architecture Overview
//!
//! ```text
//!   inherited env ──▶ config::env ──▶ defaults applied only if unset
//!                          │
//!                          ▼
//!   launcher.toml ──▶ config::loader ──▶ LauncherConfig
//!                          │
//!                          ▼
//!              ┌───────────────────────┐        SIGINT / SIGTERM
//!              │  lifecycle::startup   │◀──── lifecycle::signals
//!              └──────────┬────────────┘
//!                         │
//!          ┌──────────────┴──────────────┐
//!          ▼                             ▼
//!   install (npm ci/install)      process (npm run dev)
//!          │                             │
//!          └──────── supervised child ───┘
//!                         │
//!                         ▼
//!                  exit code of child
//!                  (130 on interrupt)
//! ```

use std::path::PathBuf;

use clap::Parser;

use dev_launcher::config::{env, load_or_default, LauncherConfig, Overrides};
use dev_launcher::error::LaunchError;
use dev_launcher::lifecycle::{signals, Launcher};
use dev_launcher::observability::logging;

#[derive(Parser)]
#[command(name = "dev-launcher")]
#[command(about = "Install dependencies and run a dev server, relaying signals to it", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to install and run in (overrides the config file).
    #[arg(short = 'C', long)]
    project_root: Option<PathBuf>,

    /// Never run the installer (same as SKIP_INSTALL=1).
    #[arg(long)]
    skip_install: bool,

    /// Remove existing dependencies and reinstall (same as FORCE_INSTALL=1).
    #[arg(long)]
    force_install: bool,

    /// Print the resolved plan as JSON and exit.
    #[arg(long)]
    dry_run: bool,

    /// Server command to run instead of the configured one.
    #[arg(last = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref());
    let log_level = config
        .as_ref()
        .map(|c| c.observability.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    logging::init(&log_level);

    let code = match config {
        Ok(config) => match run(cli, config).await {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Launch failed");
                e.exit_code()
            }
        },
        Err(e) => {
            let e = LaunchError::from(e);
            tracing::error!(error = %e, "Launch failed");
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli, config: LauncherConfig) -> Result<i32, LaunchError> {
    let overrides = Overrides {
        project_root: cli.project_root,
        skip_install: cli.skip_install,
        force_install: cli.force_install,
        command: cli.command,
    };
    let launcher = Launcher::configure(config, &overrides, env::snapshot())?;

    if cli.dry_run {
        println!("{}", launcher.plan_json()?);
        return Ok(0);
    }

    tracing::info!("dev-launcher v{} starting", env!("CARGO_PKG_VERSION"));

    let mut signals = signals::listen()?;
    let outcome = launcher.run(&mut signals).await?;
    Ok(outcome.exit_code())
}
