//! Insertion-ordered pattern collection
//!
//! Backs the include list of a proxy entry. A second entry with the same
//! `pattern` string is refused, and a list read from disk keeps only the
//! first occurrence of each pattern.

use std::collections::HashSet;
use std::ops::Deref;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::pattern::CandidatePattern;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CandidatePattern>", into = "Vec<CandidatePattern>")]
pub struct PatternSet {
    items: Vec<CandidatePattern>,
    keys: HashSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list, keeping the first occurrence of each pattern.
    pub fn from_patterns<I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = CandidatePattern>,
    {
        let mut set = PatternSet::new();
        let mut collapsed = 0;
        for pattern in patterns {
            let key = pattern.pattern.clone();
            if !set.insert(pattern) {
                debug!("Dropping repeated pattern: {}", key);
                collapsed += 1;
            }
        }
        if collapsed > 0 {
            warn!("Collapsed {} repeated patterns in include list", collapsed);
        }
        set
    }

    /// Adds the pattern, returning `false` when it was already present.
    pub fn insert(&mut self, pattern: CandidatePattern) -> bool {
        if !self.keys.insert(pattern.pattern.clone()) {
            return false;
        }
        self.items.push(pattern);
        true
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.keys.contains(pattern)
    }

    pub fn into_vec(self) -> Vec<CandidatePattern> {
        self.items
    }
}

impl Deref for PatternSet {
    type Target = [CandidatePattern];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl PartialEq for PatternSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for PatternSet {}

impl From<Vec<CandidatePattern>> for PatternSet {
    fn from(patterns: Vec<CandidatePattern>) -> Self {
        PatternSet::from_patterns(patterns)
    }
}

impl From<PatternSet> for Vec<CandidatePattern> {
    fn from(set: PatternSet) -> Self {
        set.items
    }
}
