//! Pattern model definitions
//!
//! A pattern is the unit FoxyProxy matches URLs against. The `pattern`
//! string is the deduplication key everywhere in the crate.

use serde::{Deserialize, Serialize};

/// Matching strategy of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    #[default]
    Wildcard,
    Regex,
}

/// A single include/exclude entry of a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub title: String,
    pub pattern: String,
    pub active: bool,
}

impl CandidatePattern {
    /// Builds the canonical `*domain*` wildcard for a host.
    pub fn wildcard(domain: &str) -> Self {
        CandidatePattern {
            pattern_type: PatternType::Wildcard,
            title: domain.to_string(),
            pattern: format!("*{}*", domain),
            active: true,
        }
    }

    pub fn regex(title: &str, pattern: &str) -> Self {
        CandidatePattern {
            pattern_type: PatternType::Regex,
            title: title.to_string(),
            pattern: pattern.to_string(),
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_constructor() {
        let p = CandidatePattern::wildcard("example.com");
        assert_eq!(p.pattern, "*example.com*");
        assert_eq!(p.title, "example.com");
        assert_eq!(p.pattern_type, PatternType::Wildcard);
        assert!(p.active);
    }

    #[test]
    fn test_serialized_shape() {
        let p = CandidatePattern::wildcard("foo.com");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r#"{"type":"wildcard","title":"foo.com","pattern":"*foo.com*","active":true}"#
        );
    }

    #[test]
    fn test_regex_type_deserializes() {
        let p: CandidatePattern = serde_json::from_str(
            r#"{"type":"regex","title":"10.*.*.*","pattern":"^x$","active":false}"#,
        )
        .unwrap();
        assert_eq!(p.pattern_type, PatternType::Regex);
        assert!(!p.active);
    }
}
