//! Error types for the import pipeline.

use crate::storage::StorageError;

/// Configuration problems, raised before any network activity.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// All errors that can occur while importing a snapshot.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("{status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("stats error: {0}")]
    Stats(#[from] wcl_stats::StatsError),
}

/// Convenience result type.
pub type ImportResult<T> = Result<T, ImportError>;
