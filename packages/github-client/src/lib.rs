//! Pure GitHub search REST API client.
//!
//! A minimal client for the GitHub search endpoints. Supports code search with
//! inline text-match fragments and repository search. No domain logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_client::{CodeSearchParams, GithubClient};
//!
//! let client = GithubClient::new(std::env::var("GITHUB_TOKEN").ok())?;
//!
//! let page = client
//!     .search_code(&CodeSearchParams::new("\"app.kubernetes.io/name\"").per_page(50))
//!     .await?;
//! for item in &page.items {
//!     println!("{} {}", item.repository.full_name, item.path);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{GithubError, Result};
pub use types::{
    CodeSearchItem, CodeSearchPage, CodeSearchParams, RepoSearchPage, RepoSearchParams,
    Repository, RepositoryRef, TextMatch, MAX_PER_PAGE,
};

use std::time::Duration;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "Lens-App-Name-Matcher";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type that makes code search attach `text_matches` fragments.
const TEXT_MATCH_MEDIA_TYPE: &str = "application/vnd.github.v3.text-match+json";
const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Pure GitHub API client.
#[derive(Clone)]
pub struct GithubClient {
    http_client: Client,
    token: Option<String>,
    base_url: String,
}

impl GithubClient {
    /// Create a client with the default 30 second request timeout.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(token: Option<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GithubError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            token: token.filter(|t| !t.is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (GitHub Enterprise, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Code search. Returns exactly one page; callers page explicitly.
    pub async fn search_code(&self, params: &CodeSearchParams) -> Result<CodeSearchPage> {
        debug!(query = %params.q, per_page = params.per_page, "GitHub code search");
        let page: CodeSearchPage = self
            .get_json("/search/code", params, TEXT_MATCH_MEDIA_TYPE)
            .await?;
        debug!(
            total_count = page.total_count,
            items = page.items.len(),
            incomplete = page.incomplete_results,
            "GitHub code search completed"
        );
        Ok(page)
    }

    /// Repository search, one page.
    pub async fn search_repositories(&self, params: &RepoSearchParams) -> Result<RepoSearchPage> {
        debug!(query = %params.q, page = params.page, "GitHub repository search");
        self.get_json("/search/repositories", params, JSON_MEDIA_TYPE)
            .await
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q, accept: &str) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let start = std::time::Instant::now();

        let mut request = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, accept)
            .header(header::USER_AGENT, DEFAULT_USER_AGENT)
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, path, "GitHub request failed");
            GithubError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, path, "GitHub API error");
            return Err(GithubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json()
            .await
            .map_err(|e| GithubError::Parse(e.to_string()))?;

        debug!(path, duration_ms = start.elapsed().as_millis(), "GitHub request");

        Ok(body)
    }
}
