//! Object storage backends for published snapshots.
//!
//! [`ObjectStore`] is the seam between the publisher and a concrete backend:
//! Azure Data Lake Gen2 in production, the local filesystem for dry runs.

pub mod datalake;
pub mod local;

use async_trait::async_trait;

pub use datalake::DataLakeStore;
pub use local::LocalStore;

/// Outcome of making sure a container exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    AlreadyExists,
}

/// Errors raised by storage backends.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{operation} failed with {status} ({code}): {body}")]
    Status {
        operation: &'static str,
        status: u16,
        code: String,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid account key: {0}")]
    InvalidKey(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// A container/path addressed blob store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    /// Create `container` unless it already exists.
    async fn ensure_container(&self, container: &str) -> Result<ContainerStatus, StorageError>;

    /// Write `body` to `path`, replacing any existing object.
    async fn put(&self, container: &str, path: &str, body: Vec<u8>) -> Result<(), StorageError>;
}
