//! Media files on the local filesystem

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use calendar_common::StorageConfig;
use calendar_core::traits::{MediaStore, RepoResult};
use tokio::fs;
use tracing::{debug, instrument};

use crate::error::{StorageError, StorageResult};

/// Stores files below `root`, addressed by relative paths
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.media_url)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media root if it does not exist
    pub async fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Map a relative path below the root, refusing anything that escapes it
    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        if path.is_empty() {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        for component in relative.components() {
            if !matches!(component, Component::Normal(_)) {
                return Err(StorageError::InvalidPath(path.to_string()));
            }
        }
        Ok(self.root.join(relative))
    }

    async fn write_file(&self, path: &str, bytes: &[u8]) -> StorageResult<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full, bytes).await?;
        Ok(())
    }

    async fn read_file(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(e),
        })
    }

    async fn remove_file(&self, path: &str) -> StorageResult<()> {
        let full = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path, "File already absent");
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn save(&self, path: &str, bytes: &[u8]) -> RepoResult<()> {
        Ok(self.write_file(path, bytes).await?)
    }

    #[instrument(skip(self))]
    async fn read(&self, path: &str) -> RepoResult<Vec<u8>> {
        Ok(self.read_file(path).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> RepoResult<()> {
        Ok(self.remove_file(path).await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LocalMediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path(), "/media/");
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_read_delete() {
        let (_dir, store) = store();
        let path = "event_images/2024/06/01/a.jpg";

        store.save(path, b"jpeg bytes").await.unwrap();
        assert_eq!(store.read(path).await.unwrap(), b"jpeg bytes");
        assert!(store.root().join(path).exists());

        store.delete(path).await.unwrap();
        assert!(store.read(path).await.is_err());
        // deleting twice is fine
        store.delete(path).await.unwrap();
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let (_dir, store) = store();
        for bad in ["../etc/passwd", "/etc/passwd", "a/../../b", ""] {
            assert!(matches!(
                store.resolve(bad),
                Err(StorageError::InvalidPath(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read_file("event_images/nope.jpg").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_url() {
        let (_dir, store) = store();
        assert_eq!(
            store.url("event_images/2024/06/01/a.jpg"),
            "/media/event_images/2024/06/01/a.jpg"
        );
    }
}
