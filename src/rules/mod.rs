//! Rule handling: normalization, deduplication and ordering.

pub mod dedup;
pub mod filter_list;
pub mod normalize;
pub mod ordering;

pub use dedup::{DedupOutcome, Deduplicator};
pub use filter_list::{
    parse_custom_urls, parse_filter_list, split_interactive_input, ConversionReport,
};
pub use normalize::{is_skipped_line, normalize_rule, normalize_url, Rejected};
pub use ordering::OrderingPolicy;
