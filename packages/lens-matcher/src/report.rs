//! Aggregation and export of extracted label values.
//!
//! Search results are flattened into one [`LabelEntry`] per extracted value
//! occurrence. Entries are never deduplicated; unique counts are derived on
//! the side. Each value gets two fingerprints:
//!
//! - `fingerprint`: MD5 of the value, lowercase hex (32 chars)
//! - `derived_fingerprint`: standard base64 of that hex string's text
//!
//! Both depend on the value alone, never on where it was found.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Local;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::labels::LabelType;
use crate::search::SearchResult;

pub const TSV_HEADER: &str =
    "Label_Type\tLabel_Value\tRepository\tURL\tMD5_Hash\tBase64_Encoded_MD5";

/// One extracted label value with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub label_type: LabelType,
    pub value: String,
    pub repository: String,
    pub url: String,
}

impl LabelEntry {
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.value)
    }

    pub fn derived_fingerprint(&self) -> String {
        derived_fingerprint(&self.value)
    }

    /// Tab-separated row. Tabs or newlines inside fields are not escaped.
    pub fn to_tsv_row(&self) -> String {
        let hash = self.fingerprint();
        let encoded = STANDARD.encode(&hash);
        [
            self.label_type.as_str(),
            self.value.as_str(),
            self.repository.as_str(),
            self.url.as_str(),
            hash.as_str(),
            encoded.as_str(),
        ]
        .join("\t")
    }
}

/// MD5 of `value`, lowercase hex.
pub fn fingerprint(value: &str) -> String {
    format!("{:x}", md5::compute(value.as_bytes()))
}

/// Base64 of the hex digest text (not of the raw digest bytes).
pub fn derived_fingerprint(value: &str) -> String {
    STANDARD.encode(fingerprint(value))
}

/// Flatten every extracted value into entries, sorted by
/// (label type, value, repository).
pub fn build_label_entries(results: &[SearchResult]) -> Vec<LabelEntry> {
    let mut entries: Vec<LabelEntry> = results
        .iter()
        .flat_map(|result| {
            LabelType::ALL.into_iter().flat_map(move |label| {
                result.values_for(label).iter().map(move |value| LabelEntry {
                    label_type: label,
                    value: value.clone(),
                    repository: result.repository.clone(),
                    url: result.url.clone(),
                })
            })
        })
        .collect();

    sort_entries(&mut entries);
    entries
}

/// Stable sort by (label type, value, repository); strings compare byte-wise.
pub fn sort_entries(entries: &mut [LabelEntry]) {
    entries.sort_by(|a, b| {
        (a.label_type, &a.value, &a.repository).cmp(&(b.label_type, &b.value, &b.repository))
    });
}

/// Distinct values per label type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UniqueCounts {
    pub names: usize,
    pub components: usize,
}

pub fn unique_counts(entries: &[LabelEntry]) -> UniqueCounts {
    let distinct = |label: LabelType| {
        entries
            .iter()
            .filter(|e| e.label_type == label)
            .map(|e| e.value.as_str())
            .collect::<HashSet<_>>()
            .len()
    };

    UniqueCounts {
        names: distinct(LabelType::Name),
        components: distinct(LabelType::Component),
    }
}

/// Header line plus one line per entry, newline-terminated.
pub fn render_tsv(entries: &[LabelEntry]) -> String {
    let mut out = String::with_capacity(TSV_HEADER.len() + entries.len() * 160);
    out.push_str(TSV_HEADER);
    out.push('\n');
    for entry in entries {
        out.push_str(&entry.to_tsv_row());
        out.push('\n');
    }
    out
}

pub fn write_tsv(path: &Path, entries: &[LabelEntry]) -> Result<()> {
    fs::write(path, render_tsv(entries))
        .with_context(|| format!("Failed to write TSV report to {}", path.display()))
}

/// JSON export: per-result structure, not the flattened entries.
#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub search_patterns: Vec<String>,
    pub language: Option<String>,
    pub repository_filter: Option<String>,
    pub results: &'a [SearchResult],
    pub timestamp: String,
}

impl<'a> SearchReport<'a> {
    /// Stamped with the current local time (ISO-8601).
    pub fn new(
        search_patterns: Vec<String>,
        language: Option<String>,
        repository_filter: Option<String>,
        results: &'a [SearchResult],
    ) -> Self {
        Self {
            search_patterns,
            language,
            repository_filter,
            results,
            timestamp: Local::now().to_rfc3339(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label_type: LabelType, value: &str, repository: &str) -> LabelEntry {
        LabelEntry {
            label_type,
            value: value.to_string(),
            repository: repository.to_string(),
            url: format!("https://github.com/{}", repository),
        }
    }

    fn result(repository: &str, names: &[&str], components: &[&str]) -> SearchResult {
        let to_vec = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut extracted_values: Vec<String> =
            names.iter().map(|n| format!("name:{}", n)).collect();
        extracted_values.extend(components.iter().map(|c| format!("component:{}", c)));

        SearchResult {
            repository: repository.to_string(),
            file_path: "chart/templates/deployment.yaml".to_string(),
            line_number: 0,
            matched_name: "deployment.yaml".to_string(),
            context_lines: vec![],
            url: format!("https://github.com/{}/blob/main/chart/templates/deployment.yaml", repository),
            extracted_names: to_vec(names),
            extracted_components: to_vec(components),
            extracted_values,
        }
    }

    #[test]
    fn test_fingerprint_known_values() {
        assert_eq!(fingerprint("nginx"), "ee434023cf89d7dfb21f63d64f0f9d74");
        assert_eq!(fingerprint(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            derived_fingerprint(""),
            "ZDQxZDhjZDk4ZjAwYjIwNGU5ODAwOTk4ZWNmODQyN2U="
        );
    }

    #[test]
    fn test_fingerprint_format() {
        let hash = fingerprint("backend");
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        // 32 ASCII bytes encode to 44 base64 chars with one pad.
        let derived = derived_fingerprint("backend");
        assert_eq!(derived.len(), 44);
        assert_eq!(STANDARD.decode(&derived).unwrap(), hash.as_bytes());
    }

    #[test]
    fn test_fingerprint_deterministic_and_distinct() {
        assert_eq!(fingerprint("redis"), fingerprint("redis"));
        assert_eq!(derived_fingerprint("redis"), derived_fingerprint("redis"));
        assert_ne!(fingerprint("redis"), fingerprint("Redis"));
        assert_ne!(fingerprint("redis"), fingerprint("postgres"));
    }

    #[test]
    fn test_fingerprint_ignores_provenance() {
        let a = entry(LabelType::Name, "nginx", "acme/shop");
        let b = entry(LabelType::Component, "nginx", "other/repo");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.derived_fingerprint(), b.derived_fingerprint());
    }

    #[test]
    fn test_sort_order() {
        let mut entries = vec![
            entry(LabelType::Component, "b", "r1"),
            entry(LabelType::Name, "a", "r1"),
            entry(LabelType::Name, "c", "r1"),
        ];
        sort_entries(&mut entries);

        let order: Vec<_> = entries
            .iter()
            .map(|e| (e.label_type, e.value.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (LabelType::Name, "a"),
                (LabelType::Name, "c"),
                (LabelType::Component, "b"),
            ]
        );
    }

    #[test]
    fn test_sort_is_case_sensitive_then_by_repository() {
        let mut entries = vec![
            entry(LabelType::Name, "api", "zeta/repo"),
            entry(LabelType::Name, "Api", "acme/repo"),
            entry(LabelType::Name, "api", "acme/repo"),
        ];
        sort_entries(&mut entries);

        let order: Vec<_> = entries
            .iter()
            .map(|e| (e.value.as_str(), e.repository.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("Api", "acme/repo"), ("api", "acme/repo"), ("api", "zeta/repo")]
        );
    }

    #[test]
    fn test_build_entries_keeps_duplicates() {
        let results = vec![
            result("acme/shop", &["nginx", "nginx"], &["frontend"]),
            result("other/site", &["nginx"], &[]),
        ];

        let entries = build_label_entries(&results);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].value, "nginx");
        assert_eq!(entries[0].repository, "acme/shop");
        assert_eq!(entries[1].repository, "acme/shop");
        assert_eq!(entries[2].repository, "other/site");
        assert_eq!(entries[3].label_type, LabelType::Component);
        assert_eq!(entries[3].url, results[0].url);
    }

    #[test]
    fn test_unique_counts() {
        let results = vec![
            result("acme/shop", &["nginx", "nginx"], &["frontend", "db"]),
            result("other/site", &["nginx", "redis"], &["db"]),
        ];
        let entries = build_label_entries(&results);

        assert_eq!(entries.len(), 7);
        assert_eq!(
            unique_counts(&entries),
            UniqueCounts {
                names: 2,
                components: 2
            }
        );
        assert_eq!(unique_counts(&[]), UniqueCounts::default());
    }

    #[test]
    fn test_render_tsv() {
        let entries = vec![entry(LabelType::Name, "nginx", "acme/shop")];
        let tsv = render_tsv(&entries);
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TSV_HEADER);

        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "nginx",
                "acme/shop",
                "https://github.com/acme/shop",
                "ee434023cf89d7dfb21f63d64f0f9d74",
                "ZWU0MzQwMjNjZjg5ZDdkZmIyMWY2M2Q2NGYwZjlkNzQ=",
            ]
        );
    }

    #[test]
    fn test_render_tsv_header_only() {
        assert_eq!(render_tsv(&[]), format!("{}\n", TSV_HEADER));
    }

    #[test]
    fn test_report_json_shape() {
        let results = vec![result("acme/shop", &["nginx"], &["backend"])];
        let report = SearchReport::new(
            vec!["app.kubernetes.io/name".to_string()],
            Some("yaml".to_string()),
            None,
            &results,
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["search_patterns"][0], "app.kubernetes.io/name");
        assert_eq!(value["language"], "yaml");
        assert!(value["repository_filter"].is_null());
        assert_eq!(value["results"][0]["extracted_names"][0], "nginx");
        assert_eq!(value["results"][0]["extracted_values"][1], "component:backend");
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }
}
