//! autopush - stage, commit, and push repository changes from CI
//!
//! This library provides the core functionality for the autopush binary:
//! - A guarded git subprocess layer (allow-listed subcommands, sanitized
//!   arguments) with typed operation outcomes
//! - An ordered commit-and-push workflow with idempotent no-change handling
//! - A GitHub pull-request gateway
//! - CI input binding and output publishing per the hosted runner
//!   conventions

pub mod cli;
pub mod errors;
pub mod git;
pub mod github;
pub mod inputs;
pub mod logging;
pub mod outputs;
pub mod retry;
pub mod workflow;

// Re-export commonly used types
pub use errors::{AutopushError, Result};
pub use git::{CommitOutcome, Git, GitSubcommand, PushOutcome};
pub use workflow::{Workflow, WorkflowOutcome, WorkflowParams};
