//! Configuration merge engine and persistence.

pub mod engine;
pub mod store;

pub use engine::{merge, MergeEngine, MergeStats};
pub use store::{export_patterns, load_document, load_pattern_list, parse_document, save_document};
