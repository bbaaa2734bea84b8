// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Query building, label extraction and aggregation live in domain modules
// that call through these traits.

use async_trait::async_trait;
use github_client::{CodeSearchPage, RepoSearchPage};

// =============================================================================
// Search Service Trait (Infrastructure - remote search API)
// =============================================================================

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Run one code search request and return the raw page.
    async fn search_code(&self, query: &str, per_page: u32) -> github_client::Result<CodeSearchPage>;

    /// Run one repository search request (1-based `page`).
    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> github_client::Result<RepoSearchPage>;
}
