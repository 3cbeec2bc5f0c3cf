//! Command-line interface
//!
//! Flags mirror the CI inputs so the binary can be exercised locally; any
//! flag left unset falls back to the `INPUT_*` environment and then the
//! documented default.

use std::path::PathBuf;

use clap::Parser;

use crate::inputs::InputOverrides;

/// Stage, commit, and push repository changes, optionally opening a pull request
#[derive(Parser, Debug)]
#[command(name = "autopush")]
#[command(version)]
#[command(about = "Stage, commit, and push repository changes, optionally opening a pull request")]
pub struct Cli {
    /// The author name to use for the commit
    #[arg(long)]
    pub author_name: Option<String>,

    /// The author email to use for the commit
    #[arg(long)]
    pub author_email: Option<String>,

    /// The branch target to push the commit to
    #[arg(long)]
    pub branch: Option<String>,

    /// The commit message to use for the commit
    #[arg(long)]
    pub commit_message: Option<String>,

    /// Create the branch if it is missing
    #[arg(long)]
    pub create_branch: bool,

    /// The directory path to use for adding changes to the commit
    #[arg(long)]
    pub directory_path: Option<String>,

    /// Fetch the latest changes before pushing the commit
    #[arg(long)]
    pub fetch_latest: bool,

    /// Force push the commit
    #[arg(long)]
    pub force_push: bool,

    /// The GitHub hostname to use for access
    #[arg(long)]
    pub github_hostname: Option<String>,

    /// The GitHub token to use for authentication
    #[arg(long)]
    pub github_token: Option<String>,

    /// Open a pull request after pushing the commit
    #[arg(long)]
    pub open_pull_request: bool,

    /// The remote reference to use for the commit
    #[arg(long)]
    pub remote_ref: Option<String>,

    /// The repository in "owner/repo" form
    #[arg(long)]
    pub repository: Option<String>,

    /// Sign the commit
    #[arg(long)]
    pub sign_commit: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Turn the parsed flags into input overrides.
    pub fn overrides(&self) -> InputOverrides {
        InputOverrides {
            author_email: self.author_email.clone(),
            author_name: self.author_name.clone(),
            branch: self.branch.clone(),
            commit_message: self.commit_message.clone(),
            create_branch: self.create_branch,
            directory_path: self.directory_path.clone(),
            fetch_latest: self.fetch_latest,
            force_push: self.force_push,
            github_hostname: self.github_hostname.clone(),
            github_token: self.github_token.clone(),
            open_pull_request: self.open_pull_request,
            remote_ref: self.remote_ref.clone(),
            repository: self.repository.clone(),
            sign_commit: self.sign_commit,
        }
    }
}
