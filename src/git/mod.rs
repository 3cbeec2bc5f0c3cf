//! Guarded git subprocess layer
//!
//! Allow-listed subcommands, sanitized arguments, and semantic operations
//! with typed outcomes.

pub mod guard;
pub mod operations;
pub mod runner;

pub use guard::{ensure_quoted, sanitize, GitSubcommand};
pub use operations::{CommitOutcome, Git, PushOutcome, COMMIT_HASH_OUTPUT};
pub use runner::{ExecOutput, GitRunner};
