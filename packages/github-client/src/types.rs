use serde::{Deserialize, Serialize};

/// Largest page size the search endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Query parameters for `GET /search/code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSearchParams {
    pub q: String,
    pub sort: String,
    pub order: String,
    pub per_page: u32,
}

impl CodeSearchParams {
    /// Most recently indexed matches first, one full page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            sort: "indexed".to_string(),
            order: "desc".to_string(),
            per_page: MAX_PER_PAGE,
        }
    }

    /// Page size, capped at [`MAX_PER_PAGE`].
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.min(MAX_PER_PAGE);
        self
    }
}

/// Query parameters for `GET /search/repositories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSearchParams {
    pub q: String,
    pub sort: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
}

impl RepoSearchParams {
    /// Most starred repositories first, starting at page 1.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            sort: "stars".to_string(),
            order: "desc".to_string(),
            per_page: MAX_PER_PAGE,
            page: 1,
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.min(MAX_PER_PAGE);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// One page of code search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeSearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<CodeSearchItem>,
}

/// A single file match from code search.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeSearchItem {
    /// File name of the match (e.g. `deployment.yaml`)
    #[serde(default)]
    pub name: String,
    pub path: String,
    pub html_url: String,
    pub repository: RepositoryRef,
    /// Not part of the documented payload; zero when absent.
    #[serde(default)]
    pub line_number: u64,
    /// Present only when the `text-match` media type was requested.
    #[serde(default)]
    pub text_matches: Vec<TextMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub full_name: String,
}

/// A highlighted fragment attached to a code search item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextMatch {
    #[serde(default)]
    pub object_url: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub fragment: Option<String>,
}

/// One page of repository search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoSearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<Repository>,
}

/// Repository metadata from repository search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
}
