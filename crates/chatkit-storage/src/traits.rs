//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends
//! must implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options for a single put.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Cache-Control header to attach to the stored object.
    pub cache_control: Option<String>,
    /// When false, a put on an occupied key fails with
    /// [`StorageError::AlreadyExists`] instead of silently replacing the
    /// object.
    pub overwrite: bool,
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait
/// so the upload orchestrator can work with any backend without coupling
/// to implementation details.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` at `key` as a single atomic write: afterwards either
    /// the object exists in full or nothing was created.
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        opts: PutOptions,
    ) -> StorageResult<()>;

    /// Publicly accessible URL for `key`. Derived from configuration,
    /// no network call.
    fn public_url(&self, key: &str) -> String;

    /// Delete the object at `key`. Behavior for a missing key is
    /// backend-defined and propagated unchanged.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Delete several keys, stopping at the first failure.
    async fn delete_many(&self, keys: &[String]) -> StorageResult<()> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(())
    }

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
