//! Filesystem-backed store for dry runs.
//!
//! Lays objects out as `<root>/<container>/<path>`, mirroring the Data Lake
//! hierarchy so a dry run produces the same relative paths.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{ContainerStatus, ObjectStore, StorageError};

/// Writes snapshots under a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object path, refusing anything that escapes the container.
    fn object_path(&self, container: &str, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        let clean = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !clean {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.container_dir(container)?.join(rel))
    }

    fn container_dir(&self, container: &str) -> Result<PathBuf, StorageError> {
        if container.is_empty() || container.contains(|c| c == '/' || c == '\\') || container == ".." {
            return Err(StorageError::InvalidPath(container.to_string()));
        }
        Ok(self.root.join(container))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }

    async fn ensure_container(&self, container: &str) -> Result<ContainerStatus, StorageError> {
        let dir = self.container_dir(container)?;
        if tokio::fs::metadata(&dir).await.is_ok_and(|m| m.is_dir()) {
            return Ok(ContainerStatus::AlreadyExists);
        }
        tokio::fs::create_dir_all(&dir).await?;
        Ok(ContainerStatus::Created)
    }

    async fn put(&self, container: &str, path: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let target = self.object_path(container, path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, body).await?;
        tracing::debug!(path = %target.display(), "wrote local object");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_container_reports_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        assert_eq!(
            store.ensure_container("warcraft-logs-data").await.unwrap(),
            ContainerStatus::Created
        );
        assert_eq!(
            store.ensure_container("warcraft-logs-data").await.unwrap(),
            ContainerStatus::AlreadyExists
        );
    }

    #[test]
    fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        tokio_test::block_on(async {
            store.put("c", "a/b.json", b"first".to_vec()).await.unwrap();
            store.put("c", "a/b.json", b"second".to_vec()).await.unwrap();
        });
        let written = std::fs::read(dir.path().join("c/a/b.json")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_put_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        for bad in ["../x.json", "/etc/x.json", ""] {
            let err = store.put("c", bad, vec![]).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidPath(_)), "{bad}");
        }
        assert!(store.ensure_container("../up").await.is_err());
    }
}
