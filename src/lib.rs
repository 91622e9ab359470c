pub mod error;
pub mod merge;
pub mod models;
pub mod rules;
pub mod runner;
pub mod settings;
pub mod sources;
pub mod utils;

// Re-export the main types for easier access
pub use error::{AppError, Result};
pub use models::{CandidatePattern, ConfigurationDocument, PatternType, ProxyEntry};
pub use settings::Settings;
