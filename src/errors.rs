//! Error types for autopush
//!
//! Each error type has a corresponding error code for programmatic handling.
//! "Nothing to commit" is deliberately not an error; it is a normal outcome
//! of the commit operation (see `git::operations::CommitOutcome`).

use thiserror::Error;

/// Result type alias for autopush operations
pub type Result<T> = std::result::Result<T, AutopushError>;

/// Main error type for all autopush operations
#[derive(Debug, Error)]
pub enum AutopushError {
    /// Subcommand outside the git allow-list
    #[error("Unauthorized command: {0}")]
    UnauthorizedCommand(String),

    /// Argument failed sanitization; the offending value is carried verbatim
    #[error("Security risk detected in input: {0}")]
    SecurityRisk(String),

    /// A required input resolved to an empty value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Staging path missing before any subprocess ran
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// The git binary could not be invoked, or a required follow-up read
    /// (commit hash) failed after an otherwise successful operation
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    /// A pipeline step exited non-zero
    #[error("git {operation} exited with status {exit_code}")]
    GitOperationFailed {
        operation: &'static str,
        exit_code: i32,
    },

    /// The commit step failed for a reason other than an empty diff
    #[error("Commit failed. Please check your commit message format and ensure GPG is set up if commit signing is enabled.")]
    CommitFailed { exit_code: i32 },

    /// Malformed "owner/repo" configuration
    #[error("Invalid repository format: {0:?} (expected \"owner/repo\")")]
    InvalidRepositoryFormat(String),

    /// Pull request creation failed
    #[error("Error creating pull request: {0}")]
    PullRequestCreation(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AutopushError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            AutopushError::UnauthorizedCommand(_) => "UNAUTHORIZED_COMMAND",
            AutopushError::SecurityRisk(_) => "SECURITY_RISK",
            AutopushError::InvalidInput(_) => "INVALID_INPUT",
            AutopushError::DirectoryNotFound(_) => "DIRECTORY_NOT_FOUND",
            AutopushError::CommandFailed(_) => "COMMAND_FAILED",
            AutopushError::GitOperationFailed { .. } => "GIT_OPERATION_FAILED",
            AutopushError::CommitFailed { .. } => "COMMIT_FAILED",
            AutopushError::InvalidRepositoryFormat(_) => "INVALID_REPOSITORY_FORMAT",
            AutopushError::PullRequestCreation(_) => "PULL_REQUEST_CREATION",
            AutopushError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(_error: &AutopushError) -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AutopushError::UnauthorizedCommand("rebase".into()).code(),
            "UNAUTHORIZED_COMMAND"
        );
        assert_eq!(
            AutopushError::SecurityRisk("$(id)".into()).code(),
            "SECURITY_RISK"
        );
        assert_eq!(
            AutopushError::DirectoryNotFound("/missing".into()).code(),
            "DIRECTORY_NOT_FOUND"
        );
        assert_eq!(
            AutopushError::CommandFailed("spawn".into()).code(),
            "COMMAND_FAILED"
        );
        assert_eq!(
            AutopushError::InvalidRepositoryFormat("owner".into()).code(),
            "INVALID_REPOSITORY_FORMAT"
        );
        assert_eq!(
            AutopushError::CommitFailed { exit_code: 128 }.code(),
            "COMMIT_FAILED"
        );
    }

    #[test]
    fn test_commit_failed_guidance() {
        let message = AutopushError::CommitFailed { exit_code: 1 }.to_string();
        assert!(message.contains("commit message format"));
        assert!(message.contains("GPG"));
    }

    #[test]
    fn test_security_risk_carries_offending_input() {
        let message = AutopushError::SecurityRisk("a;b".into()).to_string();
        assert!(message.contains("a;b"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&AutopushError::CommandFailed("x".into())), 1);
        assert_eq!(
            to_exit_code(&AutopushError::CommitFailed { exit_code: 2 }),
            1
        );
    }
}
