//! Configuration schema definitions.
//!
//! All types derive Serde traits so the launcher can be configured from an
//! optional TOML file. Every field has a default, so an empty file (or no
//! file at all) yields the stock Node.js dev-server setup.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Root configuration for the launcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Working directory for the installer and the dev server.
    pub project_root: PathBuf,

    /// Dependency install settings.
    pub install: InstallConfig,

    /// Dev server command.
    pub server: ServerConfig,

    /// Environment defaults, applied only to keys absent from the
    /// inherited environment.
    #[serde(
        default = "default_env",
        deserialize_with = "merge_env_defaults"
    )]
    pub env: BTreeMap<String, String>,

    /// Signal forwarding and escalation.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            install: InstallConfig::default(),
            server: ServerConfig::default(),
            env: default_env(),
            shutdown: ShutdownConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Package manager install configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Package manager executable (e.g., "npm").
    pub program: String,

    /// Directory the package manager installs into, relative to the
    /// project root.
    pub dependency_dir: PathBuf,

    /// Lockfile whose presence selects `locked_args`.
    pub lockfile: PathBuf,

    /// Arguments used when the lockfile exists (reproducible install).
    pub locked_args: Vec<String>,

    /// Arguments used when there is no lockfile.
    pub unlocked_args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            dependency_dir: PathBuf::from("node_modules"),
            lockfile: PathBuf::from("package-lock.json"),
            locked_args: vec!["ci".to_string()],
            unlocked_args: vec!["install".to_string()],
        }
    }
}

/// Dev server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Executable that starts the dev server.
    pub program: String,

    /// Arguments passed to `program`.
    pub args: Vec<String>,
}

impl ServerConfig {
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new(self.program.clone(), self.args.iter().cloned())
    }

    /// Replace the configured command.
    pub fn set_command(&mut self, command: CommandSpec) {
        self.program = command.program;
        self.args = command.args;
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            program: "npm".to_string(),
            args: vec!["run".to_string(), "dev".to_string()],
        }
    }
}

/// Signal forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShutdownConfig {
    /// Seconds to wait after the first forwarded signal before sending
    /// SIGKILL. Zero disables escalation on timeout.
    pub grace_period_secs: u64,

    /// Run each child in its own process group and signal the whole group,
    /// so grandchildren (e.g. `node` under `npm`) are stopped too. Disable
    /// when the dev server needs to read from the terminal.
    pub process_group: bool,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 10,
            process_group: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Built-in environment defaults for a containerized Node.js dev server.
pub fn default_env() -> BTreeMap<String, String> {
    [
        ("NODE_ENV", "development"),
        ("HOST", "0.0.0.0"),
        ("PORT", "5000"),
        ("CHOKIDAR_USEPOLLING", "true"),
        ("WATCHPACK_POLLING", "true"),
        ("BROWSER", "none"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// An `[env]` table from a config file extends the built-in defaults
/// rather than replacing them.
fn merge_env_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, String>::deserialize(deserializer)?;
    let mut env = default_env();
    env.extend(overrides);
    Ok(env)
}
