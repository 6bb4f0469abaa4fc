//! Environment flags and default variables.
//!
//! The inherited environment is captured once into an [`EnvMap`]; flag
//! parsing and defaulting operate on that snapshot so they never depend on
//! (or mutate) the process environment. Names and values are kept as
//! `OsString` so nothing inherited is lost on the way to the child.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// Snapshot of environment variables, ordered for stable output.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Values treated as boolean true (compared case-insensitively).
pub const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

pub const SKIP_INSTALL: &str = "SKIP_INSTALL";
pub const FORCE_INSTALL: &str = "FORCE_INSTALL";

/// Capture the current process environment, byte-for-byte.
pub fn snapshot() -> EnvMap {
    std::env::vars_os().collect()
}

pub fn is_truthy(raw: &str) -> bool {
    TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t))
}

/// Read a boolean flag, returning `default` when the variable is unset.
/// A value that is not valid Unicode is never truthy.
pub fn env_flag(env: &EnvMap, name: &str, default: bool) -> bool {
    env.get(OsStr::new(name))
        .map_or(default, |raw| raw.to_str().is_some_and(is_truthy))
}

/// Install behaviour requested through the environment (or CLI).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallFlags {
    /// Never run the installer.
    pub skip: bool,
    /// Delete an existing dependency directory and reinstall.
    pub force: bool,
}

impl InstallFlags {
    pub fn from_env(env: &EnvMap) -> Self {
        Self {
            skip: env_flag(env, SKIP_INSTALL, false),
            force: env_flag(env, FORCE_INSTALL, false),
        }
    }
}

/// Insert each default whose key is absent. Returns the keys that were
/// filled in.
pub fn apply_defaults(env: &mut EnvMap, defaults: &BTreeMap<String, String>) -> Vec<String> {
    let mut applied = Vec::new();
    for (key, value) in defaults {
        if !env.contains_key(OsStr::new(key)) {
            env.insert(key.into(), value.into());
            applied.push(key.clone());
        }
    }
    applied
}
