//! GitHub API boundary
//!
//! The workflow consumes pull-request creation as a capability so tests can
//! substitute a recording double for the HTTP client.

mod client;

use async_trait::async_trait;

use crate::errors::Result;

pub use client::{GitHubClient, GitHubParams, DEFAULT_PR_BODY, DEFAULT_PR_TITLE};

/// Capability to open a pull request on the code host.
#[async_trait]
pub trait PullRequestGateway {
    /// Open a pull request from `head` into `base`.
    ///
    /// Implementations skip the call (with a warning) when `head == base`.
    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<()>;
}
