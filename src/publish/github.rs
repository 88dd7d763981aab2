use crate::error::{AffirmError, Result};
use crate::publish::TagPublisher;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("affirm/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Creates tag refs through `POST /repos/{owner}/{repo}/git/refs`
pub struct GitHubPublisher {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubPublisher {
    /// Create a publisher for an `owner/repo` repository
    ///
    /// # Arguments
    /// * `api_url` - REST API base URL (e.g., "https://api.github.com")
    /// * `repository` - Repository slug in `owner/repo` form
    /// * `token` - Token authorized to create refs
    ///
    /// # Returns
    /// * `Ok(GitHubPublisher)` - Ready to publish
    /// * `Err` - If the slug is malformed or the HTTP client cannot be built
    pub fn new(api_url: &str, repository: &str, token: impl Into<String>) -> Result<Self> {
        let (owner, repo) = parse_repository(repository)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(GitHubPublisher {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.into(),
        })
    }

    /// Replace the HTTP client (proxies, timeouts, TLS settings)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Endpoint used to create references
    pub fn refs_url(&self) -> String {
        format!("{}/repos/{}/{}/git/refs", self.api_url, self.owner, self.repo)
    }
}

/// Split an `owner/repo` slug
pub fn parse_repository(repository: &str) -> Result<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(AffirmError::config(format!(
            "Repository must be in 'owner/repo' form, got '{}'",
            repository
        ))),
    }
}

impl TagPublisher for GitHubPublisher {
    fn create_tag_ref(&self, tag: &str, sha: &str) -> Result<()> {
        let reference = format!("refs/tags/{}", tag);
        tracing::debug!(%reference, %sha, url = %self.refs_url(), "creating tag ref");

        let response = self
            .client
            .post(self.refs_url())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&CreateRefRequest {
                reference: &reference,
                sha,
            })
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<ApiErrorBody>()
            .map(|body| body.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

        Err(AffirmError::publish(format!(
            "Cannot create {} ({}): {}",
            reference, status, message
        )))
    }
}
