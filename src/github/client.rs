//! reqwest-based GitHub client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::json;

use async_trait::async_trait;

use crate::errors::{AutopushError, Result};
use crate::github::PullRequestGateway;
use crate::logging::redact;
use crate::retry::{with_retry, RetryConfig};

/// Title used when the caller does not supply one.
pub const DEFAULT_PR_TITLE: &str = "Automated Pull Request";

/// Body used when the caller does not supply one.
pub const DEFAULT_PR_BODY: &str = "Automated pull request created by GitHub Action.";

const API_VERSION: &str = "2022-11-28";

/// Connection parameters for one repository.
#[derive(Debug, Clone)]
pub struct GitHubParams {
    /// API base, e.g. `https://api.github.com`
    pub base_url: String,

    /// Token presented as a bearer credential
    pub token: String,

    pub owner: String,
    pub repo: String,
}

impl GitHubParams {
    /// Derive the API base URL from a hostname (`github.com` or a GitHub
    /// Enterprise host).
    pub fn for_hostname(hostname: &str, token: &str, owner: &str, repo: &str) -> Self {
        GitHubParams {
            base_url: format!("https://api.{}", hostname),
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// GitHub REST client implementing [`PullRequestGateway`].
pub struct GitHubClient {
    params: GitHubParams,
    http: reqwest::Client,
    retry: RetryConfig,
}

impl GitHubClient {
    pub fn new(params: GitHubParams) -> Self {
        GitHubClient {
            params,
            http: reqwest::Client::new(),
            retry: RetryConfig::default(),
        }
    }

    /// Endpoint for pull-request creation.
    fn pulls_url(&self) -> String {
        let GitHubParams {
            base_url,
            owner,
            repo,
            ..
        } = &self.params;
        format!("{}/repos/{}/{}/pulls", base_url, owner, repo)
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.params.token);
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|_| AutopushError::InvalidInput("github-token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("autopush"));
        Ok(headers)
    }

    async fn post_pull_request(&self, payload: &serde_json::Value) -> Result<()> {
        let url = self.pulls_url();
        let headers = self.default_headers()?;

        let send = || {
            let request = self
                .http
                .post(&url)
                .headers(headers.clone())
                .json(payload);
            async move {
                let response = request.send().await.map_err(|e| redact(&e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(redact(&format!("{}: {}", status, body)));
                }
                Ok(())
            }
        };

        with_retry(&self.retry, send)
            .await
            .map_err(AutopushError::PullRequestCreation)
    }
}

#[async_trait]
impl PullRequestGateway for GitHubClient {
    async fn create_pull_request(
        &self,
        head: &str,
        base: &str,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<()> {
        if head == base {
            tracing::warn!(
                "Skipping pull request creation: 'head' ({}) and 'base' ({}) are the same.",
                head,
                base
            );
            return Ok(());
        }

        let payload = json!({
            "head": head,
            "base": base,
            "title": title.unwrap_or(DEFAULT_PR_TITLE),
            "body": body.unwrap_or(DEFAULT_PR_BODY),
        });

        self.post_pull_request(&payload).await?;
        tracing::info!("Pull request created successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(GitHubParams::for_hostname(
            "github.com",
            "token",
            "octo",
            "repo",
        ))
    }

    #[test]
    fn test_pulls_url() {
        assert_eq!(
            client().pulls_url(),
            "https://api.github.com/repos/octo/repo/pulls"
        );
    }

    #[test]
    fn test_for_hostname_enterprise() {
        let params = GitHubParams::for_hostname("ghe.example.com", "t", "o", "r");
        assert_eq!(params.base_url, "https://api.ghe.example.com");
    }

    #[test]
    fn test_default_headers() {
        let headers = client().default_headers().unwrap();
        assert_eq!(
            headers.get(ACCEPT).unwrap(),
            "application/vnd.github+json"
        );
        assert_eq!(headers.get("X-GitHub-Api-Version").unwrap(), API_VERSION);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer token");
    }

    #[tokio::test]
    async fn test_same_branch_skips_without_network() {
        // base_url points nowhere; reaching the network would error
        let gateway = GitHubClient::new(GitHubParams {
            base_url: "https://api.invalid.localdomain".to_string(),
            token: "t".to_string(),
            owner: "o".to_string(),
            repo: "r".to_string(),
        });
        gateway
            .create_pull_request("main", "main", None, None)
            .await
            .unwrap();
    }
}
