//! Command-line overrides layered over the loaded configuration.

use std::path::PathBuf;

use crate::config::env::InstallFlags;
use crate::config::schema::{CommandSpec, LauncherConfig};

/// Settings given on the command line. Flags only ever turn behaviour on;
/// they never clear what the environment requested.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_root: Option<PathBuf>,
    pub skip_install: bool,
    pub force_install: bool,
    /// Replacement server command, program first. Empty keeps the
    /// configured one.
    pub command: Vec<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut LauncherConfig) {
        if let Some(root) = &self.project_root {
            config.project_root = root.clone();
        }
        if let Some((program, args)) = self.command.split_first() {
            config
                .server
                .set_command(CommandSpec::new(program.clone(), args.iter().cloned()));
        }
    }

    pub fn merge_flags(&self, from_env: InstallFlags) -> InstallFlags {
        InstallFlags {
            skip: from_env.skip || self.skip_install,
            force: from_env.force || self.force_install,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = LauncherConfig::default();
        Overrides::default().apply(&mut config);
        assert_eq!(config.server.command().to_string(), "npm run dev");
        assert_eq!(config.project_root, PathBuf::from("."));
    }

    #[test]
    fn test_command_and_root_replace_config() {
        let overrides = Overrides {
            project_root: Some(PathBuf::from("/srv/app")),
            command: vec!["pnpm".into(), "dev".into(), "--port".into(), "3000".into()],
            ..Overrides::default()
        };
        let mut config = LauncherConfig::default();
        overrides.apply(&mut config);

        assert_eq!(config.project_root, PathBuf::from("/srv/app"));
        assert_eq!(
            config.server.command(),
            CommandSpec::new("pnpm", ["dev", "--port", "3000"])
        );
    }

    #[test]
    fn test_flags_are_ored_with_env() {
        let env_force = InstallFlags {
            skip: false,
            force: true,
        };
        let cli_skip = Overrides {
            skip_install: true,
            ..Overrides::default()
        };
        assert_eq!(
            cli_skip.merge_flags(env_force),
            InstallFlags {
                skip: true,
                force: true
            }
        );
        assert_eq!(Overrides::default().merge_flags(env_force), env_force);
    }
}
