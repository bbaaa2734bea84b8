//! Testing utilities including mock implementations.
//!
//! These let the search, report and name-generation paths run without
//! making real GitHub calls.

use async_trait::async_trait;
use github_client::{
    CodeSearchItem, CodeSearchPage, GithubError, RepoSearchPage, Repository, RepositoryRef,
    TextMatch,
};
use std::sync::{Arc, RwLock};

use crate::traits::BaseSearchService;

/// Failure the mock returns instead of a page.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Api { status: u16, message: String },
    Network(String),
}

impl MockFailure {
    fn to_error(&self) -> GithubError {
        match self {
            MockFailure::Api { status, message } => GithubError::Api {
                status: *status,
                message: message.clone(),
            },
            MockFailure::Network(message) => GithubError::Network(message.clone()),
        }
    }
}

/// Record of a call made to the mock search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockSearchCall {
    Code { query: String, per_page: u32 },
    Repositories { query: String, per_page: u32, page: u32 },
}

/// A mock search service with canned pages.
///
/// Code search always returns the configured items (or failure). Repository
/// search returns the configured pages by 1-based page number and an empty
/// page past the end.
#[derive(Default, Clone)]
pub struct MockSearchService {
    code_items: Arc<RwLock<Vec<CodeSearchItem>>>,
    code_failure: Arc<RwLock<Option<MockFailure>>>,
    repo_pages: Arc<RwLock<Vec<Vec<Repository>>>>,
    repo_failure: Arc<RwLock<Option<MockFailure>>>,
    calls: Arc<RwLock<Vec<MockSearchCall>>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items returned by every code search.
    pub fn with_code_items(self, items: Vec<CodeSearchItem>) -> Self {
        *self.code_items.write().unwrap() = items;
        self
    }

    /// Make code search fail.
    pub fn with_code_failure(self, failure: MockFailure) -> Self {
        *self.code_failure.write().unwrap() = Some(failure);
        self
    }

    /// Append one page of repository search results.
    pub fn with_repository_page(self, repos: Vec<Repository>) -> Self {
        self.repo_pages.write().unwrap().push(repos);
        self
    }

    /// Make repository search fail.
    pub fn with_repository_failure(self, failure: MockFailure) -> Self {
        *self.repo_failure.write().unwrap() = Some(failure);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockSearchCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn code_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockSearchCall::Code { .. }))
            .count()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search_code(&self, query: &str, per_page: u32) -> github_client::Result<CodeSearchPage> {
        self.calls.write().unwrap().push(MockSearchCall::Code {
            query: query.to_string(),
            per_page,
        });

        if let Some(failure) = self.code_failure.read().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let items: Vec<CodeSearchItem> = self
            .code_items
            .read()
            .unwrap()
            .iter()
            .take(per_page as usize)
            .cloned()
            .collect();

        Ok(CodeSearchPage {
            total_count: self.code_items.read().unwrap().len() as u64,
            incomplete_results: false,
            items,
        })
    }

    async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
        page: u32,
    ) -> github_client::Result<RepoSearchPage> {
        self.calls.write().unwrap().push(MockSearchCall::Repositories {
            query: query.to_string(),
            per_page,
            page,
        });

        if let Some(failure) = self.repo_failure.read().unwrap().as_ref() {
            return Err(failure.to_error());
        }

        let pages = self.repo_pages.read().unwrap();
        let items = page
            .checked_sub(1)
            .and_then(|idx| pages.get(idx as usize))
            .cloned()
            .unwrap_or_default();

        Ok(RepoSearchPage {
            total_count: pages.iter().map(|p| p.len() as u64).sum(),
            items,
        })
    }
}

/// Build a code search item with one text match per fragment.
pub fn code_item(repository: &str, path: &str, fragments: &[&str]) -> CodeSearchItem {
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    CodeSearchItem {
        name,
        path: path.to_string(),
        html_url: format!("https://github.com/{}/blob/main/{}", repository, path),
        repository: RepositoryRef {
            full_name: repository.to_string(),
        },
        line_number: 0,
        text_matches: fragments
            .iter()
            .map(|f| TextMatch {
                property: Some("content".to_string()),
                fragment: Some(f.to_string()),
                ..Default::default()
            })
            .collect(),
    }
}

/// Build repository search metadata.
pub fn repository(full_name: &str, description: Option<&str>) -> Repository {
    let name = full_name.rsplit('/').next().unwrap_or(full_name).to_string();
    Repository {
        name,
        full_name: full_name.to_string(),
        description: description.map(str::to_string),
        ..Default::default()
    }
}
