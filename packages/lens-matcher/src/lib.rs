//! Lens Matcher
//!
//! Finds Kubernetes `app.kubernetes.io/name` and `app.kubernetes.io/component`
//! label values in public code via GitHub code search, and exports them as
//! JSON and tab-separated reports.
//!
//! # Architecture
//!
//! ```text
//! LabelSearcher (search.rs)
//!     │  one code search request through BaseSearchService
//!     ▼
//! LabelMatcher (labels.rs)      per context line, per label
//!     ▼
//! build_label_entries (report.rs)  flatten, sort, fingerprint
//!     ▼
//! JSON / TSV files + terminal tables (display.rs)
//! ```
//!
//! # Modules
//!
//! - [`labels`] - Label value extraction
//! - [`search`] - Query building and result mapping
//! - [`report`] - Aggregation, fingerprints and file export
//! - [`names`] - Application name generation from repository data
//! - [`traits`] - The search service seam
//! - [`github`] - GitHub-backed search service
//! - [`testing`] - Mock search service for tests

pub mod cli;
pub mod cmd;
pub mod config;
pub mod display;
pub mod github;
pub mod labels;
pub mod names;
pub mod report;
pub mod search;
pub mod testing;
pub mod traits;

pub use config::Config;
pub use github::GithubSearchService;
pub use labels::{extract_label_value, LabelMatcher, LabelType};
pub use report::{build_label_entries, LabelEntry, SearchReport, UniqueCounts};
pub use search::{LabelSearcher, SearchResult};
pub use traits::BaseSearchService;
