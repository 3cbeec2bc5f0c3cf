//! Command guard: allow-list, argument sanitization, and quoting
//!
//! The guard is the only gate between configured input and the git
//! subprocess. Subcommands are an enum, so anything the runner accepts is
//! allowed by construction; dynamic strings enter through [`GitSubcommand::parse`],
//! which fails closed. Arguments are checked against a fixed set of
//! disallowed patterns and rejected outright, never silently stripped.

use std::fmt;
use std::str::FromStr;

use crate::errors::{AutopushError, Result};

/// The set of git subcommands permitted to reach the subprocess layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitSubcommand {
    Add,
    Branch,
    Checkout,
    Clone,
    Commit,
    Config,
    Fetch,
    Merge,
    Pull,
    Push,
    Reset,
    RevParse,
    Status,
    Tag,
}

impl GitSubcommand {
    /// The verb as passed to git.
    pub fn as_str(self) -> &'static str {
        match self {
            GitSubcommand::Add => "add",
            GitSubcommand::Branch => "branch",
            GitSubcommand::Checkout => "checkout",
            GitSubcommand::Clone => "clone",
            GitSubcommand::Commit => "commit",
            GitSubcommand::Config => "config",
            GitSubcommand::Fetch => "fetch",
            GitSubcommand::Merge => "merge",
            GitSubcommand::Pull => "pull",
            GitSubcommand::Push => "push",
            GitSubcommand::Reset => "reset",
            GitSubcommand::RevParse => "rev-parse",
            GitSubcommand::Status => "status",
            GitSubcommand::Tag => "tag",
        }
    }

    /// Parse a verb against the allow-list, failing closed.
    ///
    /// # Errors
    /// * `UnauthorizedCommand` - the verb is not on the allow-list
    pub fn parse(verb: &str) -> Result<GitSubcommand> {
        match verb {
            "add" => Ok(GitSubcommand::Add),
            "branch" => Ok(GitSubcommand::Branch),
            "checkout" => Ok(GitSubcommand::Checkout),
            "clone" => Ok(GitSubcommand::Clone),
            "commit" => Ok(GitSubcommand::Commit),
            "config" => Ok(GitSubcommand::Config),
            "fetch" => Ok(GitSubcommand::Fetch),
            "merge" => Ok(GitSubcommand::Merge),
            "pull" => Ok(GitSubcommand::Pull),
            "push" => Ok(GitSubcommand::Push),
            "reset" => Ok(GitSubcommand::Reset),
            "rev-parse" => Ok(GitSubcommand::RevParse),
            "status" => Ok(GitSubcommand::Status),
            "tag" => Ok(GitSubcommand::Tag),
            _ => Err(AutopushError::UnauthorizedCommand(verb.to_string())),
        }
    }
}

impl fmt::Display for GitSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GitSubcommand {
    type Err = AutopushError;

    fn from_str(s: &str) -> Result<Self> {
        GitSubcommand::parse(s)
    }
}

/// Validate an argument before it may reach a subprocess.
///
/// Rejected patterns: parent-directory traversal (`..`), carriage return or
/// line feed, command chaining (`;` `&` `|`), backtick substitution, and
/// `$` interpolation. The offending value is carried in the error verbatim.
///
/// # Errors
/// * `SecurityRisk` - the argument matched a disallowed pattern
pub fn sanitize(argument: &str) -> Result<&str> {
    let disallowed = argument.contains("..")
        || argument
            .chars()
            .any(|c| matches!(c, '\r' | '\n' | ';' | '&' | '|' | '`' | '$'));
    if disallowed {
        return Err(AutopushError::SecurityRisk(argument.to_string()));
    }
    Ok(argument)
}

/// Wrap a value in double quotes unless it is already fully wrapped in
/// matching single or double quotes. Idempotent.
pub fn ensure_quoted(value: &str) -> String {
    let fully_wrapped = |quote: char| {
        value.len() > 1 && value.starts_with(quote) && value.ends_with(quote)
    };
    if fully_wrapped('"') || fully_wrapped('\'') {
        value.to_string()
    } else {
        format!("\"{}\"", value)
    }
}
