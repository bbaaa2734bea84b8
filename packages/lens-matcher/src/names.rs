//! Application name generation from GitHub repository data.
//!
//! Words are harvested from repository names and descriptions, then combined
//! by a handful of strategies (compounds, prefixes/suffixes, fusions and
//! "tech" endings) into title-cased candidate names.

use anyhow::{Context, Result};
use github_client::{Repository, MAX_PER_PAGE};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::search::report_search_failure;
use crate::traits::BaseSearchService;

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"[a-zA-Z]+").unwrap();
}

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should",
];

/// Words kept from each description.
const DESCRIPTION_WORD_LIMIT: usize = 5;
/// Random extra words mixed into a topic-filtered word list.
const TOPIC_SAMPLE_SIZE: usize = 50;
/// Consecutive attempts without a new name before generation stops.
const STALL_LIMIT: usize = 1_000;

/// Word lists used by the strategies. Loadable from TOML; missing keys keep
/// their defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub tech_suffixes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            prefixes: owned(&["super", "ultra", "mega", "pro", "smart", "quick", "fast", "easy"]),
            suffixes: owned(&["app", "hub", "kit", "craft", "forge", "lab", "studio", "works"]),
            tech_suffixes: owned(&["ly", "io", "ify", "js", "go", "py", "rs"]),
        }
    }
}

impl GeneratorConfig {
    /// Load from a TOML file. A missing path (or no path) yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Strategy {
    Compound,
    PrefixSuffix,
    TechFusion,
    Descriptive,
}

const STRATEGIES: [Strategy; 4] = [
    Strategy::Compound,
    Strategy::PrefixSuffix,
    Strategy::TechFusion,
    Strategy::Descriptive,
];

/// Generates candidate application names from harvested words.
#[derive(Debug, Default)]
pub struct NameGenerator {
    config: GeneratorConfig,
    words: BTreeSet<String>,
}

impl NameGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            words: BTreeSet::new(),
        }
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// Harvest words from repository names and the start of descriptions.
    pub fn analyze_repositories(&mut self, repos: &[Repository]) {
        for repo in repos {
            self.words.extend(extract_words(&repo.name));

            if let Some(description) = repo.description.as_deref() {
                self.words.extend(
                    extract_words(description)
                        .into_iter()
                        .take(DESCRIPTION_WORD_LIMIT),
                );
            }
        }
        debug!(words = self.words.len(), "Analyzed repositories");
    }

    /// Up to `count` distinct names. Gives up after `count * 10` attempts, or
    /// once the vocabulary stops producing new names, so a small vocabulary
    /// may yield fewer.
    pub fn generate_names<R: Rng + ?Sized>(
        &self,
        count: usize,
        topic: Option<&str>,
        rng: &mut R,
    ) -> Vec<String> {
        let words = self.candidate_words(topic, rng);
        if words.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let mut names = Vec::new();

        let max_attempts = count.saturating_mul(10);
        let mut attempts = 0;
        let mut stalled = 0;
        while names.len() < count && attempts < max_attempts && stalled < STALL_LIMIT {
            attempts += 1;
            stalled += 1;
            let Some(strategy) = STRATEGIES.choose(rng) else {
                break;
            };
            let Some(name) = self.apply(*strategy, &words, rng) else {
                continue;
            };
            if name.chars().count() <= 3 {
                continue;
            }
            let name = title_case(&name);
            if seen.insert(name.clone()) {
                names.push(name);
                stalled = 0;
            }
        }

        names
    }

    /// Words related to `topic` first, plus a random sample of the rest.
    fn candidate_words<R: Rng + ?Sized>(&self, topic: Option<&str>, rng: &mut R) -> Vec<String> {
        let all: Vec<String> = self.words.iter().cloned().collect();
        let Some(topic) = topic.map(str::to_lowercase).filter(|t| !t.is_empty()) else {
            return all;
        };

        let mut related: Vec<String> = all
            .iter()
            .filter(|w| topic.contains(w.as_str()) || w.contains(topic.as_str()))
            .cloned()
            .collect();
        if related.is_empty() {
            return all;
        }

        related.extend(
            all.choose_multiple(rng, TOPIC_SAMPLE_SIZE.min(all.len()))
                .cloned(),
        );
        related
    }

    fn apply<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        words: &[String],
        rng: &mut R,
    ) -> Option<String> {
        match strategy {
            Strategy::Compound => {
                let (first, second) = pick_two(words, rng)?;
                Some(format!("{}{}", capitalize(first), capitalize(second)))
            }
            Strategy::PrefixSuffix => {
                let base = words.choose(rng)?;
                if rng.gen_bool(0.5) {
                    let prefix = self.config.prefixes.choose(rng)?;
                    Some(format!("{}{}", capitalize(prefix), capitalize(base)))
                } else {
                    let suffix = self.config.suffixes.choose(rng)?;
                    Some(format!("{}{}", capitalize(base), capitalize(suffix)))
                }
            }
            Strategy::TechFusion => {
                let (first, second) = pick_two(words, rng)?;
                let head = if first.len() > 3 {
                    &first[..first.len() / 2 + 1]
                } else {
                    first
                };
                let tail = if second.len() > 3 {
                    &second[second.len() / 2..]
                } else {
                    second
                };
                Some(capitalize(&format!("{}{}", head, tail)))
            }
            Strategy::Descriptive => {
                let base = words.choose(rng)?;
                let suffix = self.config.tech_suffixes.choose(rng)?;
                if rng.gen_bool(0.5) && base.ends_with('e') {
                    Some(format!("{}{}", &base[..base.len() - 1], suffix))
                } else {
                    Some(format!("{}{}", base, suffix))
                }
            }
        }
    }
}

/// Two different words, or `None` when there are fewer than two distinct ones.
fn pick_two<'a, R: Rng + ?Sized>(words: &'a [String], rng: &mut R) -> Option<(&'a str, &'a str)> {
    let first: &'a String = words.choose(rng)?;
    let others: Vec<&'a String> = words.iter().filter(|w| *w != first).collect();
    let second: &'a String = others.choose(rng).copied()?;
    Some((first.as_str(), second.as_str()))
}

/// Lowercased alphabetic runs longer than two characters, minus stop words.
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// `"<topic>" language:<x> stars:>=N`, or `stars:>=100` when nothing is given.
pub fn build_repository_query(
    topic: Option<&str>,
    language: Option<&str>,
    min_stars: u32,
) -> String {
    let mut parts = Vec::new();
    if let Some(topic) = topic.filter(|t| !t.is_empty()) {
        parts.push(format!("\"{}\"", topic));
    }
    if let Some(language) = language.filter(|l| !l.is_empty()) {
        parts.push(format!("language:{}", language));
    }
    if min_stars > 0 {
        parts.push(format!("stars:>={}", min_stars));
    }
    if parts.is_empty() {
        parts.push("stars:>=100".to_string());
    }
    parts.join(" ")
}

/// Fetch up to `max_pages` pages of repositories. Stops at the first empty
/// page; a failed page ends the fetch and keeps what was already collected.
pub async fn fetch_repositories<S: BaseSearchService + ?Sized>(
    service: &S,
    query: &str,
    max_pages: u32,
) -> Vec<Repository> {
    let mut repos = Vec::new();

    for page in 1..=max_pages {
        match service.search_repositories(query, MAX_PER_PAGE, page).await {
            Ok(result) if result.items.is_empty() => break,
            Ok(result) => {
                repos.extend(result.items);
                info!(page, fetched = repos.len(), "Fetched repositories");
            }
            Err(e) => {
                warn!(page, "Repository search page failed");
                report_search_failure(&e);
                break;
            }
        }
    }

    repos
}
