use crate::error::{PortfolioError, Result};
use crate::types::GitHubRepo;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Anything that can list a user's repositories, most recently updated first.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn fetch_repositories(&self, username: &str, per_page: u32) -> Result<Vec<GitHubRepo>>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: API_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| PortfolioError::ConfigError(format!("Invalid API URL {}: {}", config.api_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(PortfolioError::ConfigError(format!(
                "API URL cannot be used as a base: {}",
                config.api_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("portfolio-projects/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(GitHubClient {
            client,
            base_url,
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    /// URL of the repository listing for `username`.
    ///
    /// The username is a single percent-encoded path segment, so `/`, `?`
    /// and `#` cannot leave the `users/{username}/repos` path.
    pub fn repos_url(&self, username: &str, per_page: u32) -> Result<Url> {
        if username.trim().is_empty() || username == "." || username == ".." {
            return Err(PortfolioError::ConfigError(format!(
                "Invalid username: {:?}",
                username
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PortfolioError::ConfigError(format!("API URL cannot be used as a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["users", username, "repos"]);

        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &per_page.to_string());

        Ok(url)
    }

    /// Single GET, no retry. Any non-success status is an error.
    async fn make_request(&self, url: Url) -> Result<Response> {
        let mut request = self.client.get(url.clone()).header("Accept", ACCEPT_HEADER);

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;

        if let Some(remaining) = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok())
        {
            if remaining < 10 {
                warn!(remaining, "GitHub rate limit running low");
            } else {
                debug!(remaining, "GitHub rate limit");
            }
        }

        match response.status() {
            status if status.is_success() => Ok(response),
            reqwest::StatusCode::NOT_FOUND => {
                Err(PortfolioError::NotFound(format!("Resource not found: {}", url)))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(PortfolioError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_repositories(&self, username: &str, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = self.repos_url(username, per_page)?;
        let started = Instant::now();

        let response = self.make_request(url).await?;
        let body = response.bytes().await?;
        let repos: Vec<GitHubRepo> = serde_json::from_slice(&body)?;

        debug!(
            username,
            repos = repos.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched repositories"
        );

        Ok(repos)
    }
}
