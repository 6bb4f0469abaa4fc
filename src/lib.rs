//! Development server launcher.
//!
//! Applies environment defaults, installs dependencies when needed, runs the
//! dev server, and relays termination signals to it.

pub mod config;
pub mod error;
pub mod install;
pub mod lifecycle;
pub mod observability;
pub mod process;

pub use config::schema::LauncherConfig;
pub use error::LaunchError;
pub use lifecycle::Launcher;
pub use process::ExitOutcome;
