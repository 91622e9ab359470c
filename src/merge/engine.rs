//! Configuration merge engine
//!
//! Appends new patterns to the include list of the first proxy entry,
//! skipping anything already present. Running the same merge twice leaves
//! the document unchanged after the first run.

use log::debug;

use crate::error::{AppError, Result};
use crate::models::{CandidatePattern, ConfigurationDocument, PatternSet, ProxyEndpoint};
use crate::rules::{Deduplicator, OrderingPolicy};

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub duplicates: Vec<CandidatePattern>,
}

/// Owns the in-memory document for the duration of one run.
#[derive(Debug)]
pub struct MergeEngine {
    document: ConfigurationDocument,
    dedup: Deduplicator,
    ordering: Option<OrderingPolicy>,
}

impl MergeEngine {
    /// Starts from `base`, or from a fresh default document when absent.
    pub fn new(
        base: Option<ConfigurationDocument>,
        endpoint: &ProxyEndpoint,
        ordering: Option<OrderingPolicy>,
    ) -> Result<Self> {
        let document = base.unwrap_or_else(|| ConfigurationDocument::new_default(endpoint));
        // Loaded documents are validated by `parse_document`, so only a
        // caller-built document can reach this with an empty `data` list.
        let entry = document.data.first().ok_or_else(|| {
            AppError::parse(
                "<in-memory document>",
                "caller-supplied configuration has no proxy entry in 'data'",
            )
        })?;
        let dedup = Deduplicator::seeded(entry.include.iter());
        Ok(MergeEngine {
            document,
            dedup,
            ordering,
        })
    }

    pub fn document(&self) -> &ConfigurationDocument {
        &self.document
    }

    pub fn into_document(self) -> ConfigurationDocument {
        self.document
    }

    /// Merges one batch of patterns into the include list.
    pub fn merge(&mut self, new_patterns: Vec<CandidatePattern>) -> MergeStats {
        let outcome = self.dedup.filter(new_patterns);
        for duplicate in &outcome.duplicates {
            debug!(
                "Pattern already present, skipping: title='{}', pattern='{}'",
                duplicate.title, duplicate.pattern
            );
        }

        let stats = MergeStats {
            added: outcome.accepted.len(),
            duplicates: outcome.duplicates,
        };

        // `new` guarantees the primary entry exists.
        if let Some(entry) = self.document.primary_mut() {
            for pattern in outcome.accepted {
                entry.include.insert(pattern);
            }
            if let Some(policy) = &self.ordering {
                let include = std::mem::take(&mut entry.include).into_vec();
                entry.include = PatternSet::from_patterns(policy.reorder(include));
            }
        }
        stats
    }
}

/// One-shot merge of a single batch.
pub fn merge(
    base: Option<ConfigurationDocument>,
    new_patterns: Vec<CandidatePattern>,
    ordering: Option<OrderingPolicy>,
) -> Result<(ConfigurationDocument, MergeStats)> {
    let mut engine = MergeEngine::new(base, &ProxyEndpoint::default(), ordering)?;
    let stats = engine.merge(new_patterns);
    Ok((engine.into_document(), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_exclude_patterns;

    fn list(domains: &[&str]) -> Vec<CandidatePattern> {
        domains.iter().map(|d| CandidatePattern::wildcard(d)).collect()
    }

    fn include_titles(doc: &ConfigurationDocument) -> Vec<String> {
        doc.data[0].include.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_merge_into_default() {
        let (doc, stats) = merge(None, list(&["a.com", "b.com", "a.com"]), None).unwrap();
        assert_eq!(include_titles(&doc), vec!["a.com", "b.com"]);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.duplicates.len(), 1);
        assert_eq!(doc.data[0].exclude, default_exclude_patterns());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let input = list(&["x.com", "a.com", "b.com"]);
        let policy = || Some(OrderingPolicy::default());
        let (once, _) = merge(None, input.clone(), policy()).unwrap();
        let (twice, stats) = merge(Some(once.clone()), input, policy()).unwrap();
        assert_eq!(once.data[0].include, twice.data[0].include);
        assert_eq!(stats.added, 0);
        assert_eq!(stats.duplicates.len(), 3);
    }

    #[test]
    fn test_ordering_applies_to_whole_include_list() {
        let mut engine = MergeEngine::new(
            None,
            &ProxyEndpoint::default(),
            Some(OrderingPolicy::titles_last(["x.com"])),
        )
        .unwrap();
        engine.merge(list(&["x.com", "a.com"]));
        engine.merge(list(&["b.com"]));
        assert_eq!(include_titles(engine.document()), vec!["a.com", "b.com", "x.com"]);
    }

    #[test]
    fn test_exclude_never_consulted() {
        let (doc, stats) = merge(None, list(&["msftconnecttest.com"]), None).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(doc.data[0].include[0].pattern, "*msftconnecttest.com*");
        assert_eq!(doc.data[0].exclude.len(), 7);
    }

    #[test]
    fn test_empty_data_is_rejected() {
        let mut doc = ConfigurationDocument::default();
        doc.data.clear();
        let err = merge(Some(doc), Vec::new(), None).unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }

    #[test]
    fn test_repeated_patterns_in_loaded_document_collapse() {
        let base: ConfigurationDocument = serde_json::from_str(
            r#"{"data": [{"include": [
                {"type": "wildcard", "title": "a.com", "pattern": "*a.com*", "active": true},
                {"type": "wildcard", "title": "a.com", "pattern": "*a.com*", "active": true}
            ]}]}"#,
        )
        .unwrap();
        let (doc, stats) = merge(Some(base), list(&["b.com", "a.com"]), None).unwrap();
        assert_eq!(include_titles(&doc), vec!["a.com", "b.com"]);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.duplicates.len(), 1);
    }

    #[test]
    fn test_custom_endpoint() {
        let endpoint = ProxyEndpoint {
            hostname: "10.0.0.2".to_string(),
            port: 1080,
        };
        let engine = MergeEngine::new(None, &endpoint, None).unwrap();
        assert_eq!(engine.document().data[0].port, "1080");
        assert_eq!(engine.document().data[0].hostname, "10.0.0.2");
    }
}
