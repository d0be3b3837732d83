use std::path::PathBuf;

/// Application-level errors
///
/// Only a missing or unreadable input resource is fatal. Empty mining
/// results, empty rule sets, and unknown query titles are ordinary values
/// (empty collections), not errors.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("data unavailable: {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type AppResult<T> = Result<T, AppError>;
