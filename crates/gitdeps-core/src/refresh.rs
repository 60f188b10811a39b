//! Post-update refresh command
//!
//! After the user acknowledges a manifest update, the host usually needs to
//! re-run package resolution. Projects can configure a command for that in
//! `[refresh]`; it runs as a subprocess from the project root.

use std::collections::HashMap;
use std::process::Command;

use gitdeps_fs::ProjectLayout;

use crate::config::RefreshConfig;
use crate::error::{Error, Result};

/// Result of running the refresh command
#[derive(Debug)]
pub struct RefreshResult {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Run the configured refresh command.
///
/// Fails with [`Error::RefreshFailed`] on a non-zero exit, including the
/// trimmed stderr in the message.
pub fn run_refresh(refresh: &RefreshConfig, layout: &ProjectLayout) -> Result<RefreshResult> {
    let vars = refresh_vars(layout);
    let args: Vec<String> = refresh
        .args
        .iter()
        .map(|arg| substitute_vars(arg, &vars))
        .collect();

    tracing::debug!(command = %refresh.command, ?args, "Running refresh command");

    let output = Command::new(&refresh.command)
        .args(&args)
        .current_dir(layout.root.to_native())
        .envs(&vars)
        .output()?;

    let result = RefreshResult {
        command: refresh.command.clone(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
    };

    if !output.status.success() {
        let stderr_snippet = result.stderr.trim();
        let message = if stderr_snippet.is_empty() {
            format!("exited with non-zero status (exit code: {:?})", result.exit_code)
        } else {
            format!(
                "exited with non-zero status (exit code: {:?}): {}",
                result.exit_code, stderr_snippet
            )
        };
        return Err(Error::RefreshFailed {
            command: refresh.command.clone(),
            message,
        });
    }

    Ok(result)
}

fn refresh_vars(layout: &ProjectLayout) -> HashMap<String, String> {
    HashMap::from([
        ("PROJECT_ROOT".to_string(), layout.root.to_string()),
        ("MANIFEST_PATH".to_string(), layout.manifest.to_string()),
    ])
}

/// Substitute ${VAR_NAME} patterns in a string with context variables
fn substitute_vars(input: &str, vars: &HashMap<String, String>) -> String {
    let mut result = input.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("${{{key}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_vars() {
        let vars = HashMap::from([("MANIFEST_PATH".to_string(), "/p/Packages/manifest.json".to_string())]);
        assert_eq!(
            substitute_vars("--manifest=${MANIFEST_PATH}", &vars),
            "--manifest=/p/Packages/manifest.json"
        );
        assert_eq!(substitute_vars("${UNKNOWN}", &vars), "${UNKNOWN}");
    }

    #[cfg(unix)]
    #[test]
    fn test_refresh_runs_in_project_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let refresh = RefreshConfig {
            command: "sh".into(),
            args: vec!["-c".into(), "pwd && echo \"$MANIFEST_PATH\"".into()],
        };

        let result = run_refresh(&refresh, &layout).unwrap();
        let mut lines = result.stdout.lines();
        assert_eq!(lines.next(), Some(layout.root.as_str()));
        assert_eq!(lines.next(), Some(layout.manifest.as_str()));
        assert_eq!(result.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn test_refresh_failure_includes_stderr() {
        let temp = tempfile::TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let refresh = RefreshConfig {
            command: "sh".into(),
            args: vec!["-c".into(), "echo editor not running >&2; exit 3".into()],
        };

        let err = run_refresh(&refresh, &layout).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("editor not running"), "{message}");
        assert!(message.contains("3"), "{message}");
    }

    #[test]
    fn test_missing_command_is_io_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let refresh = RefreshConfig {
            command: "gitdeps-definitely-not-a-command".into(),
            args: vec![],
        };

        assert!(matches!(run_refresh(&refresh, &layout), Err(Error::Io(_))));
    }
}
