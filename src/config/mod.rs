//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional launcher.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LauncherConfig (validated, immutable)
//!
//! command line
//!     → overrides.rs (project root, server command, install flags)
//!
//! inherited environment
//!     → env.rs (snapshot, SKIP_INSTALL / FORCE_INSTALL, defaults)
//! ```
//!
//! # Design Decisions
//! - Everything is read once at startup; nothing reloads
//! - All fields have defaults so no config file is required
//! - Environment defaults never override inherited values

pub mod env;
pub mod loader;
pub mod overrides;
pub mod schema;
pub mod validation;

pub use env::{EnvMap, InstallFlags};
pub use loader::{load_config, load_or_default, ConfigError};
pub use overrides::Overrides;
pub use schema::{CommandSpec, InstallConfig, LauncherConfig, ServerConfig, ShutdownConfig};
