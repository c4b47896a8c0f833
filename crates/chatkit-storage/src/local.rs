use crate::traits::{ObjectStorage, PutOptions, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalObjectStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalObjectStorage {
    /// Create a new LocalObjectStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for attachment storage
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalObjectStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a storage key to a filesystem path.
    ///
    /// Keys containing traversal sequences or a leading `/` are rejected
    /// so a key can never resolve outside the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|segment| segment == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }

    /// Generate public URL for a key
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
        opts: PutOptions,
    ) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let open_result = if opts.overwrite {
            fs::File::create(&path).await
        } else {
            fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
        };

        let mut file = open_result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                tracing::warn!(
                    path = %path.display(),
                    key = %key,
                    "Local storage put refused: key already occupied"
                );
                StorageError::AlreadyExists(key.to_string())
            } else {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            }
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        self.generate_url(key)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        // Deleting a missing key is a no-op, matching object stores that
        // report success for absent objects.
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn test_storage(dir: &Path) -> LocalObjectStorage {
        LocalObjectStorage::new(dir, "http://localhost:3000/media".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_and_exists() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        storage
            .put(
                "image/conv1/1_abc.jpg",
                Bytes::from_static(b"test data"),
                "image/jpeg",
                PutOptions::default(),
            )
            .await
            .unwrap();

        assert!(storage.exists("image/conv1/1_abc.jpg").await.unwrap());
        assert!(!storage.exists("image/conv1/2_def.jpg").await.unwrap());

        let written = std::fs::read(dir.path().join("image/conv1/1_abc.jpg")).unwrap();
        assert_eq!(written, b"test data");
    }

    #[tokio::test]
    async fn test_put_refuses_existing_key() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        let key = "file/conv1/1_abc.pdf";
        storage
            .put(key, Bytes::from_static(b"first"), "application/pdf", PutOptions::default())
            .await
            .unwrap();

        let second = storage
            .put(key, Bytes::from_static(b"second"), "application/pdf", PutOptions::default())
            .await;
        assert!(matches!(second, Err(StorageError::AlreadyExists(_))));

        // The original object is untouched
        let written = std::fs::read(dir.path().join(key)).unwrap();
        assert_eq!(written, b"first");
    }

    #[tokio::test]
    async fn test_put_overwrite_allowed_when_requested() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        let key = "file/conv1/1_abc.pdf";
        let overwrite = PutOptions {
            overwrite: true,
            ..Default::default()
        };
        storage
            .put(key, Bytes::from_static(b"first"), "application/pdf", overwrite.clone())
            .await
            .unwrap();
        storage
            .put(key, Bytes::from_static(b"second"), "application/pdf", overwrite)
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join(key)).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        let result = storage
            .put(
                "../../../etc/passwd",
                Bytes::from_static(b"x"),
                "text/plain",
                PutOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        let result = storage.delete("image/conv1/missing.jpg").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_many() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        let keys = vec![
            "image/conv1/1_a.jpg".to_string(),
            "image/conv1/2_b.jpg".to_string(),
        ];
        for key in &keys {
            storage
                .put(key, Bytes::from_static(b"x"), "image/jpeg", PutOptions::default())
                .await
                .unwrap();
        }

        storage.delete_many(&keys).await.unwrap();

        for key in &keys {
            assert!(!storage.exists(key).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_public_url() {
        let dir = tempdir().unwrap();
        let storage = test_storage(dir.path()).await;

        assert_eq!(
            storage.public_url("image/conv1/1_abc.jpg"),
            "http://localhost:3000/media/image/conv1/1_abc.jpg"
        );
    }
}
