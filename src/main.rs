//! autopush - stage, commit, and push repository changes from CI

use clap::Parser;

use autopush::cli::Cli;
use autopush::errors::to_exit_code;
use autopush::git::Git;
use autopush::github::{GitHubClient, GitHubParams};
use autopush::inputs::ResolvedInputs;
use autopush::workflow::{Workflow, WorkflowOutcome, WorkflowParams};
use autopush::{logging, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(WorkflowOutcome::Completed { commit_hash }) => {
            tracing::info!(commit_hash = %commit_hash, "Done.");
        }
        Ok(WorkflowOutcome::NoChanges) => {
            tracing::info!("Done. Nothing to push.");
        }
        Err(e) => {
            let message = logging::redact(&e.to_string());
            tracing::error!(code = e.code(), "{}", message);
            eprintln!(
                "Action failed: {}. Please review the logs for more details.",
                message
            );
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> Result<WorkflowOutcome> {
    let overrides = cli.overrides();
    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let inputs = ResolvedInputs::resolve(&overrides)?;
    let params = WorkflowParams::from_inputs(&inputs)?;

    let gateway = GitHubClient::new(GitHubParams::for_hostname(
        &inputs.github_hostname,
        &inputs.github_token,
        &params.repository.owner,
        &params.repository.repo,
    ));

    let workflow = Workflow::new(params, Git::open(cwd), gateway);
    workflow.run().await
}
