//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends
//! must implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for finishline_core::AppError {
    fn from(err: StorageError) -> Self {
        // Full detail is kept internally; presentation stays generic.
        finishline_core::AppError::Storage(err.to_string())
    }
}

/// Object storage abstraction.
///
/// The sanitization pipeline only ever produces `(key, bytes)` pairs; how
/// the bytes are persisted and served back is a backend concern. All
/// backends accept the key format produced by [`crate::keys`].
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object and return its publicly accessible URL.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Delete an object by its storage key.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
