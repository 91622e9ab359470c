use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a conversion run.
///
/// Invalid or duplicate rules are not errors; they are counted in the
/// reports returned by the rule and merge modules.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Parse error in '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Write error for '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AppError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Errors that only abort the remote refresh step.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, AppError::Fetch(_) | AppError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
