//! Error types for fixture generation

use thiserror::Error;

/// Errors that can occur while building or writing a dataset
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Invalid duration: hours must be at least 1, got {0}")]
    InvalidHours(u32),

    #[error("Invalid dataset '{dataset}': {reason}")]
    InvalidDataset { dataset: String, reason: String },

    #[error("Invalid start instant '{0}' (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidStart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for fixture generation
pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    pub(crate) fn invalid_dataset(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}
