//! Child process construction.

use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::config::{CommandSpec, EnvMap};
use crate::error::LaunchError;

/// Spawn `spec` in `cwd` with exactly `env` as its environment. Standard
/// streams are inherited so the child's output reaches the terminal
/// untouched. With `process_group` the child leads a new process group,
/// which the supervisor then signals as a unit.
pub fn spawn(
    spec: &CommandSpec,
    cwd: &Path,
    env: &EnvMap,
    process_group: bool,
) -> Result<Child, LaunchError> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .current_dir(cwd)
        .env_clear()
        .envs(env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    #[cfg(unix)]
    {
        if process_group {
            command.process_group(0);
        }
    }
    #[cfg(not(unix))]
    let _ = process_group;

    let child = command.spawn().map_err(|source| LaunchError::Spawn {
        program: spec.program.clone(),
        source,
    })?;

    tracing::debug!(pid = ?child.id(), command = %spec, process_group, "Spawned child");
    Ok(child)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::env;
    use std::os::unix::ffi::OsStringExt;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-binary-xyz", Vec::<String>::new());
        let err = spawn(&spec, Path::new("."), &env::snapshot(), false).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert_eq!(err.exit_code(), 127);
    }

    #[tokio::test]
    async fn test_child_sees_only_given_env() {
        let mut vars = env::snapshot();
        vars.insert("LAUNCHER_MARKER".into(), "42".into());
        let spec = CommandSpec::new("sh", ["-c", "test \"$LAUNCHER_MARKER\" = 42"]);

        let status = spawn(&spec, Path::new("."), &vars, false)
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_non_unicode_value_reaches_child() {
        let mut vars = env::snapshot();
        vars.insert(
            "LAUNCHER_BYTES".into(),
            std::ffi::OsString::from_vec(b"caf\xe9".to_vec()),
        );
        let spec = CommandSpec::new("sh", ["-c", "test \"$LAUNCHER_BYTES\" = \"$(printf 'caf\\351')\""]);

        let status = spawn(&spec, Path::new("."), &vars, true)
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert!(status.success());
    }
}
