//! Semantic git operations
//!
//! Each operation composes the guard and runner layers and interprets the
//! captured exit status. Outcomes that are routine in a commit-and-push
//! workflow (an empty diff) are values, not errors.

use std::path::Path;

use crate::errors::{AutopushError, Result};
use crate::git::guard::GitSubcommand;
use crate::git::runner::{ExecOutput, GitRunner};
use crate::outputs;

/// Output name under which the pushed commit hash is published.
pub const COMMIT_HASH_OUTPUT: &str = "commit-hash";

/// Terminal outcome of the commit operation.
///
/// `Pending -> {Committed | NoChanges | Failed}` in one call; no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The commit was created
    Committed,

    /// The work tree was clean; nothing to commit. Not an error.
    NoChanges,

    /// The commit failed for a reason other than an empty diff
    Failed { exit_code: i32 },
}

impl CommitOutcome {
    /// Numeric form of the tri-state: 0 committed, 1 no changes, 2 failed.
    pub fn code(&self) -> i32 {
        match self {
            CommitOutcome::Committed => 0,
            CommitOutcome::NoChanges => 1,
            CommitOutcome::Failed { .. } => 2,
        }
    }
}

/// Terminal outcome of the push operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Push succeeded; the resolved HEAD hash was published
    Pushed { commit_hash: String },

    /// Push exited non-zero; the commit hash was never read
    Failed { exit_code: i32 },
}

/// Semantic git operations over a guarded runner.
#[derive(Debug, Clone)]
pub struct Git {
    runner: GitRunner,
}

impl Git {
    pub fn new(runner: GitRunner) -> Self {
        Git { runner }
    }

    /// Open operations against a working directory.
    pub fn open(cwd: impl Into<std::path::PathBuf>) -> Self {
        Git::new(GitRunner::new(cwd))
    }

    pub fn runner(&self) -> &GitRunner {
        &self.runner
    }

    /// Set the commit identity for this repository, optionally enabling
    /// commit signing. Configuration is `--local`, scoping the mutation to
    /// the repository rather than process-global state.
    pub async fn update_config(&self, name: &str, email: &str, sign_commit: bool) -> Result<()> {
        self.runner
            .run(GitSubcommand::Config, &["--local", "user.name", name])
            .await?;

        self.runner
            .run(GitSubcommand::Config, &["--local", "user.email", email])
            .await?;

        if sign_commit {
            self.runner
                .run(GitSubcommand::Config, &["--local", "commit.gpgsign", "true"])
                .await?;
        }
        Ok(())
    }

    /// Fetch the latest changes from all remotes. Returns the raw exit code.
    pub async fn fetch_latest(&self) -> Result<i32> {
        let output = self.runner.run(GitSubcommand::Fetch, &["--all"]).await?;
        Ok(output.exit_code)
    }

    /// Check out a branch, optionally creating it. Returns the raw exit
    /// code; the branch's prior existence is not verified.
    pub async fn checkout_branch(&self, branch: &str, create_new: bool) -> Result<i32> {
        let args: &[&str] = if create_new {
            &["-b", branch]
        } else {
            &[branch]
        };
        let output = self.runner.run(GitSubcommand::Checkout, args).await?;
        Ok(output.exit_code)
    }

    /// Stage changes under a directory path.
    ///
    /// # Errors
    /// * `DirectoryNotFound` - the path does not exist; no subprocess ran
    pub async fn stage_changes(&self, directory_path: &str) -> Result<i32> {
        let resolved = if Path::new(directory_path).is_absolute() {
            Path::new(directory_path).to_path_buf()
        } else {
            self.runner.cwd().join(directory_path)
        };
        if !resolved.exists() {
            return Err(AutopushError::DirectoryNotFound(directory_path.to_string()));
        }

        let output = self.runner.run(GitSubcommand::Add, &[directory_path]).await?;
        Ok(output.exit_code)
    }

    /// Commit staged changes.
    ///
    /// An empty diff is an expected, benign state in a commit-and-push
    /// workflow, so it is a [`CommitOutcome::NoChanges`] value rather than
    /// an error. Detection is structured: when the commit exits non-zero, a
    /// `status --porcelain` with empty output means the work tree was clean.
    pub async fn commit_changes(&self, message: &str, sign_commit: bool) -> Result<CommitOutcome> {
        let args: &[&str] = if sign_commit {
            &["-S", "-m", message]
        } else {
            &["-m", message]
        };
        let commit = self.runner.run(GitSubcommand::Commit, args).await?;

        if commit.success() {
            return Ok(CommitOutcome::Committed);
        }

        if self.work_tree_clean().await? {
            tracing::info!(
                "No changes detected. Skipping commit. {}",
                commit.stdout.trim()
            );
            return Ok(CommitOutcome::NoChanges);
        }

        tracing::error!(
            exit_code = commit.exit_code,
            "Commit failed: {}",
            commit.stderr.trim()
        );
        Ok(CommitOutcome::Failed {
            exit_code: commit.exit_code,
        })
    }

    /// Push committed changes and publish the resulting commit hash.
    ///
    /// A failed push short-circuits without reading the hash. A successful
    /// push whose hash cannot be resolved is an unrecoverable inconsistency
    /// and escalates to an error.
    ///
    /// # Errors
    /// * `CommandFailed` - push succeeded but `rev-parse HEAD` failed
    pub async fn push_changes(
        &self,
        remote: &str,
        branch: &str,
        force: bool,
    ) -> Result<PushOutcome> {
        let mut args = vec![remote, branch];
        if force {
            args.push("--force");
        }
        let push = self.runner.run(GitSubcommand::Push, &args).await?;

        if !push.success() {
            tracing::error!(
                exit_code = push.exit_code,
                "Push failed: {}",
                push.stderr.trim()
            );
            return Ok(PushOutcome::Failed {
                exit_code: push.exit_code,
            });
        }

        let rev_parse = self.runner.run(GitSubcommand::RevParse, &["HEAD"]).await?;
        if !rev_parse.success() {
            return Err(AutopushError::CommandFailed(format!(
                "Failed to get commit hash: {}",
                rev_parse.stderr.trim()
            )));
        }

        let commit_hash = rev_parse.stdout.trim().to_string();
        outputs::set_output(COMMIT_HASH_OUTPUT, &commit_hash)?;
        Ok(PushOutcome::Pushed { commit_hash })
    }

    /// Whether the work tree has no staged or unstaged changes.
    async fn work_tree_clean(&self) -> Result<bool> {
        let status = self
            .runner
            .run(GitSubcommand::Status, &["--porcelain"])
            .await?;
        Ok(status.success() && status.stdout.trim().is_empty())
    }

    /// Raw access for callers needing an operation not modeled above.
    pub async fn raw(&self, subcommand: GitSubcommand, args: &[&str]) -> Result<ExecOutput> {
        self.runner.run(subcommand, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::process::Command;

    async fn git(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    async fn setup_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        git(temp.path(), &["init", "-b", "main"]).await;
        git(temp.path(), &["config", "user.email", "test@test.com"]).await;
        git(temp.path(), &["config", "user.name", "Test"]).await;
        std::fs::write(temp.path().join("README.md"), "# Test").unwrap();
        git(temp.path(), &["add", "-A"]).await;
        git(temp.path(), &["commit", "-m", "Initial commit"]).await;
        temp
    }

    #[tokio::test]
    async fn test_update_config_sets_identity() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        ops.update_config("CI Bot", "ci-bot@example.com", false)
            .await
            .unwrap();

        let name = ops
            .raw(GitSubcommand::Config, &["--local", "user.name"])
            .await
            .unwrap();
        assert_eq!(name.stdout.trim(), "CI Bot");
        let email = ops
            .raw(GitSubcommand::Config, &["--local", "user.email"])
            .await
            .unwrap();
        assert_eq!(email.stdout.trim(), "ci-bot@example.com");
    }

    #[tokio::test]
    async fn test_update_config_signing_flag() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        ops.update_config("CI Bot", "ci-bot@example.com", true)
            .await
            .unwrap();

        let sign = ops
            .raw(GitSubcommand::Config, &["--local", "commit.gpgsign"])
            .await
            .unwrap();
        assert_eq!(sign.stdout.trim(), "true");
    }

    #[tokio::test]
    async fn test_checkout_branch_create_new() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        assert_eq!(ops.checkout_branch("release", true).await.unwrap(), 0);

        let head = ops
            .raw(GitSubcommand::RevParse, &["--abbrev-ref", "HEAD"])
            .await
            .unwrap();
        assert_eq!(head.stdout.trim(), "release");
    }

    #[tokio::test]
    async fn test_checkout_branch_missing_is_nonzero() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        let code = ops.checkout_branch("does-not-exist", false).await.unwrap();
        assert_ne!(code, 0);
    }

    #[tokio::test]
    async fn test_stage_changes_missing_directory() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        match ops.stage_changes("/does/not/exist").await {
            Err(AutopushError::DirectoryNotFound(p)) => assert_eq!(p, "/does/not/exist"),
            other => panic!("expected DirectoryNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stage_changes_relative_path() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        std::fs::create_dir(temp.path().join("generated")).unwrap();
        std::fs::write(temp.path().join("generated/out.txt"), "data").unwrap();

        assert_eq!(ops.stage_changes("generated").await.unwrap(), 0);

        let status = ops
            .raw(GitSubcommand::Status, &["--porcelain"])
            .await
            .unwrap();
        assert!(status.stdout.contains("generated/out.txt"));
    }

    #[tokio::test]
    async fn test_commit_changes_committed() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        ops.stage_changes(".").await.unwrap();

        let outcome = ops.commit_changes("Add file", false).await.unwrap();
        assert_eq!(outcome, CommitOutcome::Committed);
        assert_eq!(outcome.code(), 0);
    }

    #[tokio::test]
    async fn test_commit_changes_no_changes() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        let outcome = ops.commit_changes("Nothing here", false).await.unwrap();
        assert_eq!(outcome, CommitOutcome::NoChanges);
        assert_eq!(outcome.code(), 1);
    }

    #[tokio::test]
    async fn test_commit_changes_failed_outside_repo() {
        let temp = TempDir::new().unwrap();
        let ops = Git::open(temp.path());

        let outcome = ops.commit_changes("Doomed", false).await.unwrap();
        match outcome {
            CommitOutcome::Failed { exit_code } => assert_ne!(exit_code, 0),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(outcome.code(), 2);
    }

    #[tokio::test]
    async fn test_push_changes_failure_short_circuits() {
        let temp = setup_repo().await;
        let ops = Git::open(temp.path());

        // No remote configured: push exits non-zero and the hash is never read
        let outcome = ops.push_changes("origin", "main", false).await.unwrap();
        match outcome {
            PushOutcome::Failed { exit_code } => assert_ne!(exit_code, 0),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_changes_success_publishes_hash() {
        let temp = setup_repo().await;
        let remote = TempDir::new().unwrap();
        git(remote.path(), &["init", "--bare"]).await;

        let ops = Git::open(temp.path());
        git(
            temp.path(),
            &["remote", "add", "origin", remote.path().to_str().unwrap()],
        )
        .await;

        let outcome = ops.push_changes("origin", "main", false).await.unwrap();
        let head = ops
            .raw(GitSubcommand::RevParse, &["HEAD"])
            .await
            .unwrap()
            .stdout
            .trim()
            .to_string();
        assert_eq!(outcome, PushOutcome::Pushed { commit_hash: head });
    }

    #[tokio::test]
    async fn test_push_changes_force_flag() {
        let temp = setup_repo().await;
        let remote = TempDir::new().unwrap();
        git(remote.path(), &["init", "--bare"]).await;

        let ops = Git::open(temp.path());
        git(
            temp.path(),
            &["remote", "add", "origin", remote.path().to_str().unwrap()],
        )
        .await;

        let outcome = ops.push_changes("origin", "main", true).await.unwrap();
        assert!(matches!(outcome, PushOutcome::Pushed { .. }));
    }
}
