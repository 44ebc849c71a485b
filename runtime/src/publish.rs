//! Snapshot publisher: serialize a record batch and write it to the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use wcl_stats::snapshot::{snapshot_path, to_json_pretty};
use wcl_stats::PerformanceRecord;

use crate::error::ImportResult;
use crate::storage::{ContainerStatus, ObjectStore};

/// Writes record batches as timestamped JSON objects in one container.
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn ObjectStore>,
    container: String,
}

impl Publisher {
    pub fn new(store: Arc<dyn ObjectStore>, container: impl Into<String>) -> Self {
        Self {
            store,
            container: container.into(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Publish under a path derived from the current UTC time.
    pub async fn publish(&self, records: &[PerformanceRecord]) -> ImportResult<String> {
        self.publish_at(records, Utc::now()).await
    }

    /// Publish under the path for `at` and return that path.
    ///
    /// A failure to create the container is logged and the upload is still
    /// attempted; the upload error, if any, is what gets reported.
    pub async fn publish_at(
        &self,
        records: &[PerformanceRecord],
        at: DateTime<Utc>,
    ) -> ImportResult<String> {
        match self.store.ensure_container(&self.container).await {
            Ok(ContainerStatus::Created) => info!(container = %self.container, "created container"),
            Ok(ContainerStatus::AlreadyExists) => {
                debug!(container = %self.container, "container already exists")
            }
            Err(e) => warn!(container = %self.container, error = %e, "container creation issue"),
        }

        let path = snapshot_path(at);
        let body = to_json_pretty(records)?;
        self.store.put(&self.container, &path, body).await?;

        info!(
            store = %self.store.describe(),
            path = %path,
            records = records.len(),
            "uploaded snapshot"
        );
        Ok(path)
    }
}
