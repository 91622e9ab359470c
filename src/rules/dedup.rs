//! Pattern deduplication
//!
//! [`Deduplicator`] filters a stream of candidates against the patterns
//! already known to a run.

use std::collections::HashSet;

use crate::models::CandidatePattern;

/// Result of filtering one batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupOutcome {
    /// Candidates seen for the first time, in input order.
    pub accepted: Vec<CandidatePattern>,
    /// Candidates dropped because their pattern was already known.
    pub duplicates: Vec<CandidatePattern>,
}

/// Tracks the patterns known to a run.
///
/// The known set only grows: every accepted candidate is registered so a
/// later batch sees it as taken.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    known: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the known set from an existing include list.
    pub fn seeded<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidatePattern>,
    {
        Deduplicator {
            known: existing.into_iter().map(|p| p.pattern.clone()).collect(),
        }
    }

    pub fn filter<I>(&mut self, candidates: I) -> DedupOutcome
    where
        I: IntoIterator<Item = CandidatePattern>,
    {
        let mut outcome = DedupOutcome::default();
        for candidate in candidates {
            if self.known.insert(candidate.pattern.clone()) {
                outcome.accepted.push(candidate);
            } else {
                outcome.duplicates.push(candidate);
            }
        }
        outcome
    }
}
