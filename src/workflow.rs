//! Workflow orchestration
//!
//! One invocation runs one strictly ordered pipeline: configure identity →
//! (fetch) → checkout → stage → commit → push → (pull request). Any step
//! error short-circuits; a clean work tree at the commit step ends the run
//! successfully without pushing or opening a pull request.

use crate::errors::{AutopushError, Result};
use crate::git::{CommitOutcome, Git, PushOutcome};
use crate::github::PullRequestGateway;
use crate::inputs::ResolvedInputs;

/// Base branch a pull request targets.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// A repository identified as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    /// Parse an `owner/repo` string.
    ///
    /// # Errors
    /// * `InvalidRepositoryFormat` - not exactly one `/` with two non-empty parts
    pub fn parse(value: &str) -> Result<Repository> {
        let mut parts = value.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                Ok(Repository {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(AutopushError::InvalidRepositoryFormat(value.to_string())),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parameters for one workflow run. Constructed once from resolved inputs,
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct WorkflowParams {
    pub author_name: String,
    pub author_email: String,
    pub branch: String,
    pub commit_message: String,
    pub create_branch: bool,
    pub directory_path: String,
    pub fetch_latest: bool,
    pub force_push: bool,
    pub open_pull_request: bool,
    pub remote_ref: String,
    pub repository: Repository,
    pub sign_commit: bool,
}

impl WorkflowParams {
    /// Build workflow parameters, validating the repository format before
    /// any subprocess runs.
    pub fn from_inputs(inputs: &ResolvedInputs) -> Result<WorkflowParams> {
        let repository = Repository::parse(&inputs.repository)?;
        Ok(WorkflowParams {
            author_name: inputs.author_name.clone(),
            author_email: inputs.author_email.clone(),
            branch: inputs.branch.clone(),
            commit_message: inputs.commit_message.clone(),
            create_branch: inputs.create_branch,
            directory_path: inputs.directory_path.clone(),
            fetch_latest: inputs.fetch_latest,
            force_push: inputs.force_push,
            open_pull_request: inputs.open_pull_request,
            remote_ref: inputs.remote_ref.clone(),
            repository,
            sign_commit: inputs.sign_commit,
        })
    }
}

/// How a run ended when no error short-circuited it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Changes were committed and pushed
    Completed { commit_hash: String },

    /// The work tree was clean; push and pull request were skipped
    NoChanges,
}

/// The ordered commit-and-push pipeline.
pub struct Workflow<G> {
    params: WorkflowParams,
    git: Git,
    gateway: G,
}

impl<G: PullRequestGateway> Workflow<G> {
    pub fn new(params: WorkflowParams, git: Git, gateway: G) -> Self {
        Workflow {
            params,
            git,
            gateway,
        }
    }

    /// Run the pipeline to completion or first failure.
    pub async fn run(&self) -> Result<WorkflowOutcome> {
        let params = &self.params;

        tracing::info!("Updating config...");
        self.git
            .update_config(&params.author_name, &params.author_email, params.sign_commit)
            .await?;

        if params.fetch_latest {
            tracing::info!("Fetching latest...");
            let code = self.git.fetch_latest().await?;
            if code != 0 {
                return Err(AutopushError::GitOperationFailed {
                    operation: "fetch",
                    exit_code: code,
                });
            }
        }

        tracing::info!("Checking out branch...");
        let code = self
            .git
            .checkout_branch(&params.branch, params.create_branch)
            .await?;
        if code != 0 {
            return Err(AutopushError::GitOperationFailed {
                operation: "checkout",
                exit_code: code,
            });
        }

        tracing::info!("Staging changes...");
        let code = self.git.stage_changes(&params.directory_path).await?;
        if code != 0 {
            return Err(AutopushError::GitOperationFailed {
                operation: "add",
                exit_code: code,
            });
        }

        tracing::info!("Committing changes...");
        match self
            .git
            .commit_changes(&params.commit_message, params.sign_commit)
            .await?
        {
            CommitOutcome::Committed => {}
            CommitOutcome::NoChanges => {
                tracing::info!("No changes to commit. Skipping push and pull request.");
                return Ok(WorkflowOutcome::NoChanges);
            }
            CommitOutcome::Failed { exit_code } => {
                return Err(AutopushError::CommitFailed { exit_code });
            }
        }

        tracing::info!("Pushing changes...");
        let commit_hash = match self
            .git
            .push_changes(&params.remote_ref, &params.branch, params.force_push)
            .await?
        {
            PushOutcome::Pushed { commit_hash } => commit_hash,
            PushOutcome::Failed { exit_code } => {
                return Err(AutopushError::GitOperationFailed {
                    operation: "push",
                    exit_code,
                });
            }
        };

        if params.open_pull_request {
            tracing::info!("Opening pull request...");
            self.gateway
                .create_pull_request(&params.branch, DEFAULT_BASE_BRANCH, None, None)
                .await?;
        }

        Ok(WorkflowOutcome::Completed { commit_hash })
    }
}
