//! Label search orchestration.
//!
//! One call to [`LabelSearcher::search_labels`] issues exactly one code search
//! request and turns every returned item into a [`SearchResult`] with the
//! configured label values pulled out of its text-match fragments.
//!
//! Only the first page is ever requested, so at most 100 results come back
//! even when more are asked for.

use colored::Colorize;
use github_client::{CodeSearchItem, GithubError, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::labels::{LabelMatcher, LabelType};
use crate::traits::BaseSearchService;

/// A code search match with the label values found in its fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub repository: String,
    pub file_path: String,
    pub line_number: u64,
    pub matched_name: String,
    pub context_lines: Vec<String>,
    pub url: String,
    pub extracted_names: Vec<String>,
    pub extracted_components: Vec<String>,
    /// `"<label-type>:<value>"` in discovery order. Kept for consumers of
    /// the older single-list output shape.
    pub extracted_values: Vec<String>,
}

impl SearchResult {
    pub fn has_extracted_values(&self) -> bool {
        !self.extracted_values.is_empty()
    }

    /// Values collected for one label type.
    pub fn values_for(&self, label: LabelType) -> &[String] {
        match label {
            LabelType::Name => &self.extracted_names,
            LabelType::Component => &self.extracted_components,
        }
    }

    fn from_item(item: CodeSearchItem, matchers: &[(LabelType, &LabelMatcher)]) -> Self {
        let context_lines: Vec<String> = item
            .text_matches
            .into_iter()
            .filter_map(|m| m.fragment)
            .collect();

        let mut extracted_names = Vec::new();
        let mut extracted_components = Vec::new();
        let mut extracted_values = Vec::new();

        for line in &context_lines {
            for (label, matcher) in matchers {
                let Some(value) = matcher.extract(line) else {
                    continue;
                };
                extracted_values.push(format!("{}:{}", label, value));
                match label {
                    LabelType::Name => extracted_names.push(value),
                    LabelType::Component => extracted_components.push(value),
                }
            }
        }

        Self {
            repository: item.repository.full_name,
            file_path: item.path,
            line_number: item.line_number,
            matched_name: item.name,
            context_lines,
            url: item.html_url,
            extracted_names,
            extracted_components,
            extracted_values,
        }
    }
}

/// Searches code for Kubernetes label keys and extracts their values.
pub struct LabelSearcher<S> {
    service: S,
    matchers: Vec<(LabelType, &'static LabelMatcher)>,
}

impl<S: BaseSearchService> LabelSearcher<S> {
    /// Search for both `app.kubernetes.io/name` and `app.kubernetes.io/component`.
    pub fn new(service: S) -> Self {
        Self::with_labels(service, &LabelType::ALL)
    }

    /// Search for a subset of labels. Duplicates are ignored and
    /// extraction order follows [`LabelType`] ordering.
    pub fn with_labels(service: S, labels: &[LabelType]) -> Self {
        let mut labels = labels.to_vec();
        labels.sort();
        labels.dedup();
        if labels.is_empty() {
            labels = LabelType::ALL.to_vec();
        }

        let matchers = labels
            .into_iter()
            .map(|label| (label, label.matcher()))
            .collect();

        Self { service, matchers }
    }

    pub fn labels(&self) -> Vec<LabelType> {
        self.matchers.iter().map(|(label, _)| *label).collect()
    }

    /// Label keys searched for, in query order.
    pub fn search_patterns(&self) -> Vec<String> {
        self.matchers
            .iter()
            .map(|(_, m)| m.key().to_string())
            .collect()
    }

    /// `"<key>" OR "<key>"` followed by optional `language:` / `repo:` qualifiers.
    pub fn build_query(&self, language: Option<&str>, repo: Option<&str>) -> String {
        let mut parts = vec![self
            .matchers
            .iter()
            .map(|(_, m)| format!("\"{}\"", m.key()))
            .collect::<Vec<_>>()
            .join(" OR ")];

        if let Some(language) = language.filter(|l| !l.is_empty()) {
            parts.push(format!("language:{}", language));
        }
        if let Some(repo) = repo.filter(|r| !r.is_empty()) {
            parts.push(format!("repo:{}", repo));
        }

        parts.join(" ")
    }

    /// Run one search and map every item to a [`SearchResult`].
    ///
    /// Failures are reported to the operator and yield an empty vector, so
    /// an empty result means either "no matches" or "search failed".
    pub async fn search_labels(
        &self,
        language: Option<&str>,
        repo: Option<&str>,
        max_results: usize,
    ) -> Vec<SearchResult> {
        let query = self.build_query(language, repo);
        let per_page = max_results.min(MAX_PER_PAGE as usize) as u32;
        debug!(query = %query, per_page, "Searching code for labels");

        let page = match self.service.search_code(&query, per_page).await {
            Ok(page) => page,
            Err(e) => {
                report_search_failure(&e);
                return Vec::new();
            }
        };

        if page.incomplete_results {
            warn!("GitHub reported incomplete search results");
        }

        let results: Vec<SearchResult> = page
            .items
            .into_iter()
            .take(max_results)
            .map(|item| SearchResult::from_item(item, &self.matchers))
            .collect();

        info!(
            count = results.len(),
            total_count = page.total_count,
            "Found code matches"
        );

        results
    }
}

/// Print a search failure, with a token hint for auth/rate-limit responses.
pub fn report_search_failure(err: &GithubError) {
    warn!(error = %err, "Code search failed");
    eprintln!("{}", format!("Error searching code: {}", err).red());
    if err.is_auth_or_rate_limit() {
        eprintln!(
            "{}",
            "Note: Code search requires authentication and is rate limited. Make sure GITHUB_TOKEN is set."
                .yellow()
        );
    }
}
