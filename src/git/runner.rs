//! Guarded git subprocess execution
//!
//! Wraps `tokio::process::Command` behind the guard layer: the subcommand
//! is an allow-list enum and every argument is sanitized before spawning.
//! A non-zero exit status is a normal result; only failure to invoke the
//! tool at all maps to an error.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::errors::{AutopushError, Result};
use crate::git::guard::{ensure_quoted, sanitize, GitSubcommand};

/// Captured outcome of one git invocation.
///
/// Produced once per subprocess run and consumed by the calling operation
/// to decide success, failure, or a special case.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Process exit code (-1 if terminated by signal)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl ExecOutput {
    /// Whether the invocation exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs git subcommands in an explicit working directory.
///
/// The working directory is a field rather than ambient process state so
/// operations stay composable and testable in isolation.
#[derive(Debug, Clone)]
pub struct GitRunner {
    cwd: PathBuf,
}

impl GitRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        GitRunner { cwd: cwd.into() }
    }

    /// Working directory this runner operates in.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Render the human-readable command line for logs and error text.
    ///
    /// Arguments are display-quoted; the actual spawn uses an argv vector,
    /// so no shell ever parses this string.
    pub fn render_command_line(subcommand: GitSubcommand, args: &[&str]) -> String {
        let rendered = args
            .iter()
            .map(|a| {
                if a.contains(char::is_whitespace) {
                    ensure_quoted(a)
                } else {
                    (*a).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("git {} {}", subcommand, rendered).trim_end().to_string()
    }

    /// Run a guarded git subcommand and capture its output.
    ///
    /// # Errors
    /// * `SecurityRisk` - an argument failed sanitization; nothing was spawned
    /// * `CommandFailed` - the git binary could not be invoked
    pub async fn run(&self, subcommand: GitSubcommand, args: &[&str]) -> Result<ExecOutput> {
        let mut sanitized: Vec<&str> = Vec::with_capacity(args.len());
        for arg in args {
            sanitized.push(sanitize(arg)?);
        }

        let command_line = Self::render_command_line(subcommand, &sanitized);
        tracing::debug!(command = %command_line, "running git");

        let output = Command::new("git")
            .arg(subcommand.as_str())
            .args(&sanitized)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                AutopushError::CommandFailed(format!("failed to invoke `{}`: {}", command_line, e))
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !stdout.trim().is_empty() {
            tracing::info!("Git output: {}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            tracing::info!("Git errors: {}", stderr.trim_end());
        }

        Ok(ExecOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_command_line_no_args() {
        let line = GitRunner::render_command_line(GitSubcommand::Fetch, &[]);
        assert_eq!(line, "git fetch");
    }

    #[test]
    fn test_render_command_line_quotes_whitespace() {
        let line =
            GitRunner::render_command_line(GitSubcommand::Commit, &["-m", "my message"]);
        assert_eq!(line, "git commit -m \"my message\"");
    }

    #[tokio::test]
    async fn test_run_rejects_tainted_argument_without_spawning() {
        let temp = TempDir::new().unwrap();
        let runner = GitRunner::new(temp.path());

        let result = runner
            .run(GitSubcommand::Checkout, &["main;rm -rf /"])
            .await;
        match result {
            Err(AutopushError::SecurityRisk(v)) => assert_eq!(v, "main;rm -rf /"),
            other => panic!("expected SecurityRisk, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_captures_nonzero_exit_as_ok() {
        let temp = TempDir::new().unwrap();
        let runner = GitRunner::new(temp.path());

        // `git status` outside a repository exits non-zero; that is a
        // normal result, not an error.
        let output = runner.run(GitSubcommand::Status, &[]).await.unwrap();
        assert!(!output.success());
        assert!(!output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let runner = GitRunner::new(temp.path());

        tokio::process::Command::new("git")
            .args(["init"])
            .current_dir(temp.path())
            .output()
            .await
            .unwrap();

        let output = runner
            .run(GitSubcommand::RevParse, &["--is-inside-work-tree"])
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "true");
    }
}
