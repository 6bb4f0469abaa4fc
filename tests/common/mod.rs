//! Shared helpers for launcher integration tests.
#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::Path;

use dev_launcher::config::env::{self, EnvMap};
use dev_launcher::config::{CommandSpec, LauncherConfig};

/// The test process environment minus the install flags, so a developer's
/// shell settings cannot leak into assertions.
pub fn base_env() -> EnvMap {
    let mut vars = env::snapshot();
    vars.remove(OsStr::new(env::SKIP_INSTALL));
    vars.remove(OsStr::new(env::FORCE_INSTALL));
    vars
}

/// A config rooted at `root` whose installer and server are shell scripts.
pub fn sh_config(root: &Path, install_script: &str, server_script: &str) -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.project_root = root.to_path_buf();
    config.install.program = "sh".into();
    config.install.locked_args = vec!["-c".into(), install_script.into()];
    config.install.unlocked_args = vec!["-c".into(), install_script.into()];
    config.server.set_command(CommandSpec::new("sh", ["-c", server_script]));
    config.shutdown.grace_period_secs = 2;
    config
}
