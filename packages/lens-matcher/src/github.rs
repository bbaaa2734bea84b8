use async_trait::async_trait;
use github_client::{
    CodeSearchPage, CodeSearchParams, GithubClient, RepoSearchPage, RepoSearchParams,
};

use crate::config::Config;
use crate::traits::BaseSearchService;

/// GitHub-backed search service
pub struct GithubSearchService {
    client: GithubClient,
}

impl GithubSearchService {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }

    /// Build the client from loaded configuration.
    pub fn from_config(config: &Config) -> github_client::Result<Self> {
        let client = GithubClient::with_timeout(config.github_token.clone(), config.timeout)?
            .with_base_url(&config.github_api_url);

        if !client.has_token() {
            tracing::warn!("GITHUB_TOKEN not set; code search requires authentication");
        }

        Ok(Self::new(client))
    }
}

#[async_trait]
impl BaseSearchService for GithubSearchService {
    async fn search_code(&self, query: &str, per_page: u32) -> github_client::Result<CodeSearchPage> {
        self.client
            .search_code(&CodeSearchParams::new(query).per_page(per_page))
            .await
    }

    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> github_client::Result<RepoSearchPage> {
        self.client
            .search_repositories(&RepoSearchParams::new(query).per_page(per_page).page(page))
            .await
    }
}
