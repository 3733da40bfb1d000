//! Storage errors

use calendar_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath(path) => {
                DomainError::ValidationError(format!("Invalid media path: {path}"))
            }
            other => DomainError::StorageError(other.to_string()),
        }
    }
}
