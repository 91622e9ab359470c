//! Include-list ordering
//!
//! FoxyProxy stops at the first matching pattern, so some broad patterns
//! have to be checked after everything else. [`OrderingPolicy`] moves the
//! entries its predicate selects to the tail, keeping relative order on
//! both sides.

use std::collections::HashSet;
use std::fmt;

use crate::models::CandidatePattern;

type Predicate = Box<dyn Fn(&CandidatePattern) -> bool + Send + Sync>;

pub struct OrderingPolicy {
    predicate: Predicate,
}

impl OrderingPolicy {
    /// A policy built from an arbitrary predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&CandidatePattern) -> bool + Send + Sync + 'static,
    {
        OrderingPolicy {
            predicate: Box::new(predicate),
        }
    }

    /// Moves every pattern whose title is one of `titles` to the end.
    pub fn titles_last<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: HashSet<String> = titles.into_iter().map(Into::into).collect();
        Self::new(move |p| titles.contains(&p.title))
    }

    /// A policy that never moves anything.
    pub fn keep() -> Self {
        Self::new(|_| false)
    }

    pub fn is_deferred(&self, pattern: &CandidatePattern) -> bool {
        (self.predicate)(pattern)
    }

    pub fn reorder(&self, patterns: Vec<CandidatePattern>) -> Vec<CandidatePattern> {
        let (mut front, back): (Vec<_>, Vec<_>) =
            patterns.into_iter().partition(|p| !self.is_deferred(p));
        front.extend(back);
        front
    }
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        Self::titles_last(["x.com"])
    }
}

impl fmt::Debug for OrderingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingPolicy").finish_non_exhaustive()
    }
}
