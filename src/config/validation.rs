//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values that would make the
//! launcher do something harmful or meaningless, most importantly a
//! dependency directory that escapes the project root (it may be deleted
//! on a forced reinstall).

use std::fmt;
use std::path::{Component, Path};

use crate::config::schema::LauncherConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error rather than stopping
/// at the first.
pub fn validate_config(config: &LauncherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.install.program.trim().is_empty() {
        errors.push(ValidationError::new("install.program", "must not be empty"));
    }
    if config.server.program.trim().is_empty() {
        errors.push(ValidationError::new("server.program", "must not be empty"));
    }
    if !is_contained_relative(&config.install.dependency_dir) {
        errors.push(ValidationError::new(
            "install.dependency_dir",
            "must be a non-empty relative path inside the project root",
        ));
    }
    if !is_contained_relative(&config.install.lockfile) {
        errors.push(ValidationError::new(
            "install.lockfile",
            "must be a non-empty relative path inside the project root",
        ));
    }
    for key in config.env.keys() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            errors.push(ValidationError::new(
                "env",
                format!("invalid variable name {:?}", key),
            ));
        }
    }
    if let Err(e) = config
        .observability
        .log_level
        .parse::<tracing::level_filters::LevelFilter>()
    {
        errors.push(ValidationError::new("observability.log_level", e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_contained_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    if components.peek().is_none() {
        return false;
    }
    components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}
