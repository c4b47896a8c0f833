//! Configuration module
//!
//! All knobs for the attachment pipeline live in one struct constructed
//! at application start and passed explicitly to whatever needs upload,
//! validate, or delete capability. No global state.

use std::env;

use crate::mime::AllowLists;

const DEFAULT_BUCKET: &str = "chat-media";
const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_CACHE_CONTROL: &str = "max-age=3600";
const DEFAULT_THUMBNAIL_OFFSET_SECONDS: f64 = 1.0;
const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Which storage backend to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.to_ascii_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            other => Err(anyhow::anyhow!("unknown storage backend: {}", other)),
        }
    }
}

/// Attachment pipeline configuration.
#[derive(Clone, Debug)]
pub struct AttachmentConfig {
    pub bucket: String,
    pub max_upload_size_bytes: usize,
    pub allow_lists: AllowLists,
    /// Cache-Control header applied to uploaded objects, if any.
    pub cache_control: Option<String>,
    /// Seek offset for video still-frame extraction.
    pub thumbnail_offset_seconds: f64,
    pub ffmpeg_path: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            allow_lists: AllowLists::default(),
            cache_control: Some(DEFAULT_CACHE_CONTROL.to_string()),
            thumbnail_offset_seconds: DEFAULT_THUMBNAIL_OFFSET_SECONDS,
            ffmpeg_path: DEFAULT_FFMPEG_PATH.to_string(),
            storage_backend: StorageBackend::S3,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
        }
    }
}

impl AttachmentConfig {
    /// Load configuration from environment variables, with defaults for
    /// everything but backend-specific settings.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(v) => StorageBackend::parse(&v)?,
            Err(_) => defaults.storage_backend,
        };

        Ok(Self {
            bucket: env::var("CHAT_MEDIA_BUCKET").unwrap_or(defaults.bucket),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_size_bytes),
            allow_lists: defaults.allow_lists,
            cache_control: env::var("UPLOAD_CACHE_CONTROL")
                .ok()
                .or(defaults.cache_control),
            thumbnail_offset_seconds: env::var("THUMBNAIL_OFFSET_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.thumbnail_offset_seconds),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or(defaults.ffmpeg_path),
            storage_backend,
            s3_region: env::var("S3_REGION").ok().or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        })
    }

    /// Ceiling in whole megabytes, as shown in violation messages.
    pub fn max_upload_size_mb(&self) -> usize {
        self.max_upload_size_bytes / (1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AttachmentConfig::default();
        assert_eq!(config.bucket, "chat-media");
        assert_eq!(config.max_upload_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.max_upload_size_mb(), 50);
        assert_eq!(config.storage_backend, StorageBackend::S3);
        assert_eq!(config.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(StorageBackend::parse("s3").unwrap(), StorageBackend::S3);
        assert_eq!(StorageBackend::parse("LOCAL").unwrap(), StorageBackend::Local);
        assert!(StorageBackend::parse("nfs").is_err());
    }
}
