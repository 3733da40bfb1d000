//! In-memory media store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use calendar_core::traits::{MediaStore, RepoResult};
use calendar_core::DomainError;
use tokio::sync::RwLock;

/// Media store backed by a map; cloning shares the contents
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.files.read().await.contains_key(path)
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn save(&self, path: &str, bytes: &[u8]) -> RepoResult<()> {
        self.files
            .write()
            .await
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read(&self, path: &str) -> RepoResult<Vec<u8>> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| DomainError::StorageError(format!("File not found: {path}")))
    }

    async fn delete(&self, path: &str) -> RepoResult<()> {
        self.files.write().await.remove(path);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("/media/{path}")
    }
}
