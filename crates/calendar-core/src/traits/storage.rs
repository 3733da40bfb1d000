//! Media storage port

use async_trait::async_trait;

use super::RepoResult;

/// Byte storage addressed by relative paths such as
/// `event_images/2024/06/01/<name>.jpg`.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write a file, creating parent directories as needed
    async fn save(&self, path: &str, bytes: &[u8]) -> RepoResult<()>;

    /// Read a whole file
    async fn read(&self, path: &str) -> RepoResult<Vec<u8>>;

    /// Remove a file. Removing a missing file is not an error.
    async fn delete(&self, path: &str) -> RepoResult<()>;

    /// Public URL for a stored path
    fn url(&self, path: &str) -> String;
}
