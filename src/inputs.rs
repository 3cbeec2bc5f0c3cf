//! CI input binding
//!
//! Inputs mirror the action manifest: each has an id, a description, a
//! default, and a required flag. Resolution order is CLI override, then the
//! `INPUT_<ID>` environment variable the hosted runner exports (id
//! uppercased, hyphens preserved), then the default. Where the manifest
//! defaulted to a workflow expression, the default reads the equivalent
//! runner environment variable instead.

use crate::errors::{AutopushError, Result};

/// Identifiers for every configurable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    AuthorEmail,
    AuthorName,
    Branch,
    CommitMessage,
    CreateBranch,
    DirectoryPath,
    FetchLatest,
    ForcePush,
    GithubHostname,
    GithubToken,
    OpenPullRequest,
    RemoteRef,
    Repository,
    SignCommit,
}

/// How an input falls back when neither a CLI flag nor `INPUT_*` is set.
#[derive(Debug, Clone, Copy)]
pub enum InputDefault {
    /// A fixed literal
    Value(&'static str),

    /// Read from a runner environment variable
    Env(&'static str),

    /// No fallback
    None,
}

/// One entry of the input table.
#[derive(Debug, Clone, Copy)]
pub struct InputEntry {
    pub input: Input,
    pub id: &'static str,
    pub description: &'static str,
    pub default: InputDefault,
    pub required: bool,
}

/// The input table, in manifest order.
pub const INPUT_TABLE: &[InputEntry] = &[
    InputEntry {
        input: Input::AuthorEmail,
        id: "author-email",
        description: "The author email to use for the commit",
        default: InputDefault::Value("github-actions@noreply.github.com"),
        required: false,
    },
    InputEntry {
        input: Input::AuthorName,
        id: "author-name",
        description: "The author name to use for the commit",
        default: InputDefault::Value("GitHub Actions"),
        required: false,
    },
    InputEntry {
        input: Input::Branch,
        id: "branch",
        description: "The branch target to push the commit to",
        default: InputDefault::Env("GITHUB_REF_NAME"),
        required: false,
    },
    InputEntry {
        input: Input::CommitMessage,
        id: "commit-message",
        description: "The commit message to use for the commit",
        default: InputDefault::Value("Automated commit-and-push by GitHub Actions"),
        required: false,
    },
    InputEntry {
        input: Input::CreateBranch,
        id: "create-branch",
        description: "Whether to create the branch if it is missing",
        default: InputDefault::Value("false"),
        required: false,
    },
    InputEntry {
        input: Input::DirectoryPath,
        id: "directory-path",
        description: "The directory path to use for adding changes to the commit",
        default: InputDefault::Value("."),
        required: false,
    },
    InputEntry {
        input: Input::FetchLatest,
        id: "fetch-latest",
        description: "Whether to fetch the latest changes before pushing the commit",
        default: InputDefault::Value("false"),
        required: false,
    },
    InputEntry {
        input: Input::ForcePush,
        id: "force-push",
        description: "Whether to force push the commit",
        default: InputDefault::Value("false"),
        required: false,
    },
    InputEntry {
        input: Input::GithubHostname,
        id: "github-hostname",
        description: "The GitHub hostname to use for access (for GitHub Enterprise <3)",
        default: InputDefault::Value("github.com"),
        required: false,
    },
    InputEntry {
        input: Input::GithubToken,
        id: "github-token",
        description: "The GitHub token to use for authentication",
        default: InputDefault::Env("GITHUB_TOKEN"),
        required: true,
    },
    InputEntry {
        input: Input::OpenPullRequest,
        id: "open-pull-request",
        description: "Whether to open a pull request after pushing the commit",
        default: InputDefault::Value("false"),
        required: false,
    },
    InputEntry {
        input: Input::RemoteRef,
        id: "remote-ref",
        description: "The remote reference to use for the commit",
        default: InputDefault::Value("origin"),
        required: false,
    },
    InputEntry {
        input: Input::Repository,
        id: "repository",
        description: "The GitHub repository to use for the commit",
        default: InputDefault::Env("GITHUB_REPOSITORY"),
        required: false,
    },
    InputEntry {
        input: Input::SignCommit,
        id: "sign-commit",
        description: "Whether to sign the commit",
        default: InputDefault::Value("false"),
        required: false,
    },
];

/// Look up the table entry for an input.
pub fn entry(input: Input) -> &'static InputEntry {
    INPUT_TABLE
        .iter()
        .find(|e| e.input == input)
        .unwrap_or_else(|| unreachable!("input table covers every Input variant"))
}

/// Runner boolean semantics: only a case-insensitive "true" is true.
pub fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// CLI-provided overrides, highest precedence in resolution.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub author_email: Option<String>,
    pub author_name: Option<String>,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
    pub create_branch: bool,
    pub directory_path: Option<String>,
    pub fetch_latest: bool,
    pub force_push: bool,
    pub github_hostname: Option<String>,
    pub github_token: Option<String>,
    pub open_pull_request: bool,
    pub remote_ref: Option<String>,
    pub repository: Option<String>,
    pub sign_commit: bool,
}

impl InputOverrides {
    fn get(&self, input: Input) -> Option<String> {
        let flag = |set: bool| set.then(|| "true".to_string());
        match input {
            Input::AuthorEmail => self.author_email.clone(),
            Input::AuthorName => self.author_name.clone(),
            Input::Branch => self.branch.clone(),
            Input::CommitMessage => self.commit_message.clone(),
            Input::CreateBranch => flag(self.create_branch),
            Input::DirectoryPath => self.directory_path.clone(),
            Input::FetchLatest => flag(self.fetch_latest),
            Input::ForcePush => flag(self.force_push),
            Input::GithubHostname => self.github_hostname.clone(),
            Input::GithubToken => self.github_token.clone(),
            Input::OpenPullRequest => flag(self.open_pull_request),
            Input::RemoteRef => self.remote_ref.clone(),
            Input::Repository => self.repository.clone(),
            Input::SignCommit => flag(self.sign_commit),
        }
    }
}

/// Environment variable the hosted runner exports for an input id.
fn runner_env_name(id: &str) -> String {
    format!("INPUT_{}", id.replace(' ', "_").to_uppercase())
}

fn resolve_from<F>(input: Input, overrides: &InputOverrides, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let entry = entry(input);

    let value = overrides
        .get(input)
        .filter(|v| !v.is_empty())
        .or_else(|| env(&runner_env_name(entry.id)).filter(|v| !v.is_empty()))
        .or_else(|| match entry.default {
            InputDefault::Value(v) => Some(v.to_string()),
            InputDefault::Env(name) => env(name).filter(|v| !v.is_empty()),
            InputDefault::None => None,
        });

    match value {
        Some(v) => Ok(v),
        None if entry.required => Err(AutopushError::InvalidInput(entry.id.to_string())),
        None => Ok(String::new()),
    }
}

/// Resolve one input against the process environment.
pub fn resolve(input: Input, overrides: &InputOverrides) -> Result<String> {
    resolve_from(input, overrides, |name| std::env::var(name).ok())
}

/// Every input, resolved and typed.
#[derive(Debug, Clone)]
pub struct ResolvedInputs {
    pub author_email: String,
    pub author_name: String,
    pub branch: String,
    pub commit_message: String,
    pub create_branch: bool,
    pub directory_path: String,
    pub fetch_latest: bool,
    pub force_push: bool,
    pub github_hostname: String,
    pub github_token: String,
    pub open_pull_request: bool,
    pub remote_ref: String,
    pub repository: String,
    pub sign_commit: bool,
}

impl ResolvedInputs {
    /// Resolve the full input set against the process environment.
    pub fn resolve(overrides: &InputOverrides) -> Result<ResolvedInputs> {
        Self::resolve_from(overrides, |name| std::env::var(name).ok())
    }

    fn resolve_from<F>(overrides: &InputOverrides, env: F) -> Result<ResolvedInputs>
    where
        F: Fn(&str) -> Option<String> + Copy,
    {
        Ok(ResolvedInputs {
            author_email: resolve_from(Input::AuthorEmail, overrides, env)?,
            author_name: resolve_from(Input::AuthorName, overrides, env)?,
            branch: resolve_from(Input::Branch, overrides, env)?,
            commit_message: resolve_from(Input::CommitMessage, overrides, env)?,
            create_branch: is_true(&resolve_from(Input::CreateBranch, overrides, env)?),
            directory_path: resolve_from(Input::DirectoryPath, overrides, env)?,
            fetch_latest: is_true(&resolve_from(Input::FetchLatest, overrides, env)?),
            force_push: is_true(&resolve_from(Input::ForcePush, overrides, env)?),
            github_hostname: resolve_from(Input::GithubHostname, overrides, env)?,
            github_token: resolve_from(Input::GithubToken, overrides, env)?,
            open_pull_request: is_true(&resolve_from(Input::OpenPullRequest, overrides, env)?),
            remote_ref: resolve_from(Input::RemoteRef, overrides, env)?,
            repository: resolve_from(Input::Repository, overrides, env)?,
            sign_commit: is_true(&resolve_from(Input::SignCommit, overrides, env)?),
        })
    }
}
