//! CLI subcommand implementations for the `wcl-importer` binary.

pub mod output;
pub mod probe_cmd;
pub mod run_cmd;
pub mod sample_cmd;
pub mod scrape_cmd;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{ImporterConfig, StorageConfig};
use crate::publish::Publisher;
use crate::storage::{DataLakeStore, LocalStore, ObjectStore};

/// Pick the store: a local directory when `out_dir` is given, otherwise the
/// Data Lake account from the environment. Credentials are checked here,
/// before any network call.
pub fn build_publisher(config: &ImporterConfig, out_dir: Option<&Path>) -> Result<Publisher> {
    let store: Arc<dyn ObjectStore> = match out_dir {
        Some(dir) => Arc::new(LocalStore::new(dir)),
        None => {
            let storage = StorageConfig::from_env().context("Data Lake credentials not configured")?;
            Arc::new(DataLakeStore::new(&storage).context("invalid Data Lake configuration")?)
        }
    };
    tracing::debug!(store = %store.describe(), container = %config.container, "publisher ready");
    Ok(Publisher::new(store, config.container.clone()))
}
