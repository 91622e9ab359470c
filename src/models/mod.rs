//! Core data models for the application
//!
//! This module contains the data structures written to and read from the
//! FoxyProxy configuration file, separated from the logic that builds them.
//!
//! ```rust
//! use foxyrules::models::{CandidatePattern, ConfigurationDocument};
//!
//! let mut doc = ConfigurationDocument::default();
//! doc.data[0].include.insert(CandidatePattern::wildcard("example.com"));
//! assert_eq!(doc.data[0].include[0].pattern, "*example.com*");
//! ```

mod foxyproxy;
mod pattern;
mod pattern_set;

pub use foxyproxy::*;
pub use pattern::*;
pub use pattern_set::PatternSet;
