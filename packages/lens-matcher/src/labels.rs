//! Kubernetes label value extraction.
//!
//! Search fragments are raw YAML/JSON/Go text, so values are pulled out with a
//! single regex per label key rather than a real parser:
//!
//! ```text
//! app.kubernetes.io/name: "nginx"   -> nginx
//! APP.KUBERNETES.IO/NAME: 'redis'   -> redis
//! app.kubernetes.io/name: postgres  -> postgres
//! app.kubernetes.io/name:           -> (none)
//! ```

use std::fmt;

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const APP_NAME_LABEL: &str = "app.kubernetes.io/name";
pub const APP_COMPONENT_LABEL: &str = "app.kubernetes.io/component";

lazy_static! {
    static ref NAME_MATCHER: LabelMatcher = LabelMatcher::new(APP_NAME_LABEL).unwrap();
    static ref COMPONENT_MATCHER: LabelMatcher = LabelMatcher::new(APP_COMPONENT_LABEL).unwrap();
}

/// The recommended Kubernetes labels this tool knows how to collect.
///
/// Ordering is `Name` before `Component`; exports sort on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    Name,
    Component,
}

impl LabelType {
    pub const ALL: [LabelType; 2] = [LabelType::Name, LabelType::Component];

    /// The literal label key searched for and extracted.
    pub fn key(&self) -> &'static str {
        match self {
            LabelType::Name => APP_NAME_LABEL,
            LabelType::Component => APP_COMPONENT_LABEL,
        }
    }

    /// Shared compiled extractor for this label's key.
    pub fn matcher(&self) -> &'static LabelMatcher {
        match self {
            LabelType::Name => &NAME_MATCHER,
            LabelType::Component => &COMPONENT_MATCHER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelType::Name => "name",
            LabelType::Component => "component",
        }
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled extractor for one label key.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    key: String,
    pattern: Regex,
}

impl LabelMatcher {
    /// Build a matcher for a literal label key. Regex metacharacters in the
    /// key are escaped, so `app.kubernetes.io` only matches literal dots.
    pub fn new(label_key: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r#"(?i){}:\s*["']?([^"'\s]+)["']?"#,
            regex::escape(label_key)
        ))?;

        Ok(Self {
            key: label_key.to_string(),
            pattern,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value of the leftmost well-formed occurrence, if any.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Extract the value following `label_key:` in `text`.
///
/// Case-insensitive, first occurrence wins, surrounding quotes are dropped.
/// Returns `None` when the key is absent or has no value after it.
pub fn extract_label_value(text: &str, label_key: &str) -> Option<String> {
    LabelMatcher::new(label_key).ok()?.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_quoted_double_value() {
        let text = r#"app.kubernetes.io/name: "nginx""#;
        assert_eq!(extract_label_value(text, APP_NAME_LABEL).as_deref(), Some("nginx"));
    }

    #[test]
    fn test_extract_quoted_single_value() {
        let text = "app.kubernetes.io/name: 'redis'";
        assert_eq!(extract_label_value(text, APP_NAME_LABEL).as_deref(), Some("redis"));
    }

    #[test]
    fn test_extract_unquoted_value() {
        let text = "app.kubernetes.io/name: postgres";
        assert_eq!(extract_label_value(text, APP_NAME_LABEL).as_deref(), Some("postgres"));
    }

    #[test]
    fn test_extract_with_surrounding_whitespace() {
        let text = "  app.kubernetes.io/name: \"my-app\"  ";
        assert_eq!(extract_label_value(text, APP_NAME_LABEL).as_deref(), Some("my-app"));
    }

    #[test]
    fn test_extract_without_space_after_colon() {
        let text = "app.kubernetes.io/component:backend";
        assert_eq!(
            extract_label_value(text, APP_COMPONENT_LABEL).as_deref(),
            Some("backend")
        );
    }

    #[test]
    fn test_extract_from_multiline_yaml() {
        let text = "metadata:\n  labels:\n    app.kubernetes.io/name: web-server\n    app.kubernetes.io/version: v1.0";
        assert_eq!(
            extract_label_value(text, APP_NAME_LABEL).as_deref(),
            Some("web-server")
        );
    }

    #[test]
    fn test_extract_case_insensitive() {
        let text = "APP.KUBERNETES.IO/NAME: backend-service";
        assert_eq!(
            extract_label_value(text, APP_NAME_LABEL).as_deref(),
            Some("backend-service")
        );
        assert_eq!(
            extract_label_value("APP.KUBERNETES.IO/NAME: x", APP_NAME_LABEL).as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_value_case_is_preserved() {
        let text = "APP.KUBERNETES.IO/NAME: UPPERCASE";
        assert_eq!(
            extract_label_value(text, APP_NAME_LABEL).as_deref(),
            Some("UPPERCASE")
        );
    }

    #[test]
    fn test_extract_special_characters() {
        let text = r#"app.kubernetes.io/name: "app_with.special-chars""#;
        assert_eq!(
            extract_label_value(text, APP_NAME_LABEL).as_deref(),
            Some("app_with.special-chars")
        );
        assert_eq!(
            extract_label_value("app.kubernetes.io/name: web-server-123", APP_NAME_LABEL)
                .as_deref(),
            Some("web-server-123")
        );
    }

    #[test]
    fn test_extract_no_match() {
        assert_eq!(extract_label_value("some.other.label: value", APP_NAME_LABEL), None);
        assert_eq!(extract_label_value("no match here", APP_NAME_LABEL), None);
        assert_eq!(extract_label_value("", APP_NAME_LABEL), None);
    }

    #[test]
    fn test_key_without_value() {
        assert_eq!(extract_label_value("app.kubernetes.io/name:", APP_NAME_LABEL), None);
        assert_eq!(extract_label_value("app.kubernetes.io/name:   ", APP_NAME_LABEL), None);
        assert_eq!(extract_label_value("key:", "key"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "app.kubernetes.io/name: first-app\nsome other content\napp.kubernetes.io/name: second-app";
        assert_eq!(
            extract_label_value(text, APP_NAME_LABEL).as_deref(),
            Some("first-app")
        );
        assert_eq!(extract_label_value("key: a\nkey: b", "key").as_deref(), Some("a"));
    }

    #[test]
    fn test_key_metacharacters_are_literal() {
        // An unescaped `.` would let `appXkubernetes` match.
        assert_eq!(
            extract_label_value("appXkubernetesYio/name: sneaky", APP_NAME_LABEL),
            None
        );
        assert_eq!(
            extract_label_value("weird(key)+: v1", "weird(key)+").as_deref(),
            Some("v1")
        );
    }

    #[test]
    fn test_quoting_variants_for_arbitrary_keys() {
        let keys = ["app.kubernetes.io/part-of", "team", "x.y/z[0]"];
        let values = ["alpha", "beta_2", "gamma.delta-3"];

        for key in keys {
            for value in values {
                for text in [
                    format!("{key}: \"{value}\""),
                    format!("{key}: '{value}'"),
                    format!("{key}: {value}"),
                ] {
                    assert_eq!(
                        extract_label_value(&text, key).as_deref(),
                        Some(value),
                        "text: {text}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_matcher_is_reusable() {
        let matcher = LabelType::Component.matcher();
        assert_eq!(matcher.key(), APP_COMPONENT_LABEL);
        assert_eq!(
            matcher.extract("app.kubernetes.io/component: db").as_deref(),
            Some("db")
        );
        assert_eq!(
            matcher.extract("app.kubernetes.io/component: cache").as_deref(),
            Some("cache")
        );
        assert_eq!(matcher.extract("app.kubernetes.io/name: db"), None);
    }

    #[test]
    fn test_label_type_ordering_and_names() {
        assert!(LabelType::Name < LabelType::Component);
        assert_eq!(LabelType::Name.to_string(), "name");
        assert_eq!(LabelType::Component.key(), APP_COMPONENT_LABEL);
    }

    #[test]
    fn test_shared_matchers_follow_label_keys() {
        for label in LabelType::ALL {
            assert_eq!(label.matcher().key(), label.key());
        }
        assert_eq!(
            LabelType::Name
                .matcher()
                .extract(r#"app.kubernetes.io/name: "nginx""#)
                .as_deref(),
            Some("nginx")
        );
    }
}
