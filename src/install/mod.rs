//! Dependency installation.
//!
//! `plan.rs` decides (skip, install, or remove-then-install) from the
//! install flags and what is on disk; `runner.rs` carries the decision out
//! with the package manager as a supervised child.

pub mod plan;
pub mod runner;

pub use plan::{install_command, plan_install, InstallPlan, SkipReason};
pub use runner::ensure_dependencies;
