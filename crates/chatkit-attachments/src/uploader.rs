//! Upload orchestration: validate → classify → name → store → describe.
//!
//! Each step is a hard gate; the orchestrator stops on the first failure
//! and creates zero objects on any failure path. The one deliberate
//! partial-failure policy is the video-thumbnail variant, where the
//! derived artifact has its own failure domain and the primary upload
//! dominates the result.

use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;

use chatkit_core::{
    AllowLists, Attachment, AttachmentConfig, MediaCategory, UploadCandidate, ValidationReport,
    Validator,
};
use chatkit_storage::{ObjectStorage, PutOptions, StorageError};

use crate::naming::KeyGenerator;
use crate::thumbnail::StillFrameExtractor;

/// Upload failure taxonomy. Errors are returned as values; nothing is
/// thrown past this boundary, so callers can render per-file status.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Candidate rejected before any network call.
    #[error("Validation failed: {}", violations.join("; "))]
    Rejected { violations: Vec<String> },

    /// Backend write failed. Includes `AlreadyExists` when the generated
    /// key collides with an existing object.
    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),

    /// The call was cancelled before the object write completed.
    #[error("Upload cancelled")]
    Cancelled,
}

impl UploadError {
    /// Violation messages for `Rejected`, empty otherwise.
    pub fn violations(&self) -> &[String] {
        match self {
            UploadError::Rejected { violations } => violations,
            _ => &[],
        }
    }
}

/// Delete failure. Surfaced to the caller; no compensating action.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("Delete failed: {0}")]
    Storage(#[from] StorageError),
}

/// Sanitize a user-supplied filename before it travels in metadata.
/// Basename only, conservative character set, capped length.
fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let base = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "file".to_string();
    }
    let sanitized: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

/// Uploads chat attachments to the backing store and returns descriptors
/// for message composition.
///
/// Constructed once at application start from [`AttachmentConfig`] and an
/// [`ObjectStorage`] backend, then passed to whatever needs upload or
/// delete capability.
pub struct AttachmentUploader {
    storage: Arc<dyn ObjectStorage>,
    validator: Validator,
    allow: AllowLists,
    keys: KeyGenerator,
    cache_control: Option<String>,
    thumbnail_offset_seconds: f64,
    frames: Option<Arc<dyn StillFrameExtractor>>,
}

impl AttachmentUploader {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: &AttachmentConfig) -> Self {
        Self {
            storage,
            validator: Validator::new(config.max_upload_size_bytes, config.allow_lists.clone()),
            allow: config.allow_lists.clone(),
            keys: KeyGenerator::default(),
            cache_control: config.cache_control.clone(),
            thumbnail_offset_seconds: config.thumbnail_offset_seconds,
            frames: None,
        }
    }

    /// Replace the key generator. Tests use this to pin the clock and
    /// token sources.
    pub fn with_key_generator(mut self, keys: KeyGenerator) -> Self {
        self.keys = keys;
        self
    }

    /// Attach a still-frame extractor, enabling video thumbnails in
    /// [`upload_video`](Self::upload_video).
    pub fn with_still_frame_extractor(mut self, frames: Arc<dyn StillFrameExtractor>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Validate a candidate without uploading, for per-file rejection
    /// messages in the picker UI.
    pub fn validate(&self, candidate: &UploadCandidate) -> ValidationReport {
        self.validator.validate(candidate)
    }

    /// Upload one candidate scoped to a conversation.
    pub async fn upload(
        &self,
        candidate: UploadCandidate,
        conversation_id: &str,
    ) -> Result<Attachment, UploadError> {
        self.upload_with_cancel(candidate, conversation_id, CancellationToken::new())
            .await
    }

    /// Upload with a per-call cancellation token.
    ///
    /// Cancellation is best-effort: if the token fires while the backend
    /// write is already in flight, the object may still have been
    /// created. Cancellation before the write starts creates nothing.
    pub async fn upload_with_cancel(
        &self,
        candidate: UploadCandidate,
        conversation_id: &str,
        cancel: CancellationToken,
    ) -> Result<Attachment, UploadError> {
        let report = self.validator.validate(&candidate);
        if !report.is_valid() {
            tracing::debug!(
                file = %candidate.original_name,
                violations = ?report.violations,
                "Upload rejected by validation"
            );
            return Err(UploadError::Rejected {
                violations: report.violations,
            });
        }

        let category = self.allow.classify(&candidate.content_type);
        let key = self.keys.generate(category, conversation_id, &candidate);
        let size = candidate.size_bytes();

        if cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let start = std::time::Instant::now();

        // Non-overwriting put: a key collision fails rather than silently
        // replacing the existing object.
        let put = self.storage.put(
            &key,
            candidate.data.clone(),
            &candidate.content_type,
            PutOptions {
                cache_control: self.cache_control.clone(),
                overwrite: false,
            },
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(key = %key, "Upload cancelled");
                return Err(UploadError::Cancelled);
            }
            result = put => result?,
        }

        let url = self.storage.public_url(&key);

        tracing::info!(
            conversation_id = %conversation_id,
            key = %key,
            category = %category,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Attachment uploaded"
        );

        Ok(Attachment {
            url,
            storage_key: key,
            original_name: sanitize_filename(&candidate.original_name),
            size_bytes: size as i64,
            content_type: candidate.content_type,
            category,
            thumbnail_url: None,
            thumbnail_key: None,
        })
    }

    /// Upload a video and derive a still-frame thumbnail for it.
    ///
    /// The primary upload runs through the same gates as
    /// [`upload`](Self::upload) and its result dominates. Thumbnail
    /// derivation and upload form an independent failure domain: any
    /// error there is logged and the returned descriptor simply has no
    /// `thumbnail_url`.
    pub async fn upload_video(
        &self,
        candidate: UploadCandidate,
        conversation_id: &str,
    ) -> Result<Attachment, UploadError> {
        let video_bytes = candidate.data.clone();
        let mut attachment = self.upload(candidate, conversation_id).await?;

        if attachment.category != MediaCategory::Video {
            return Ok(attachment);
        }
        let Some(frames) = self.frames.clone() else {
            return Ok(attachment);
        };

        match self
            .upload_thumbnail(frames.as_ref(), &video_bytes, &attachment, conversation_id)
            .await
        {
            Ok((thumbnail_key, thumbnail_url)) => {
                attachment.thumbnail_key = Some(thumbnail_key);
                attachment.thumbnail_url = Some(thumbnail_url);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %attachment.storage_key,
                    "Thumbnail generation failed; continuing without thumbnail"
                );
            }
        }

        Ok(attachment)
    }

    async fn upload_thumbnail(
        &self,
        frames: &dyn StillFrameExtractor,
        video: &Bytes,
        parent: &Attachment,
        conversation_id: &str,
    ) -> anyhow::Result<(String, String)> {
        let frame = frames
            .extract_still_frame(video, self.thumbnail_offset_seconds)
            .await?;

        let stem = parent
            .original_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(parent.original_name.as_str());
        let thumbnail =
            UploadCandidate::new(format!("{}_thumb.jpg", stem), "image/jpeg", frame);

        let uploaded = self.upload(thumbnail, conversation_id).await?;
        Ok((uploaded.storage_key, uploaded.url))
    }

    /// Delete the object at `storage_key`. No cascading cleanup: deleting
    /// a video does not delete its thumbnail; callers holding a
    /// `thumbnail_key` delete it themselves.
    pub async fn delete(&self, storage_key: &str) -> Result<(), DeleteError> {
        self.storage.delete(storage_key).await?;
        tracing::info!(key = %storage_key, "Attachment deleted");
        Ok(())
    }

    /// Delete several objects, stopping at the first failure.
    pub async fn delete_many(&self, storage_keys: &[String]) -> Result<(), DeleteError> {
        self.storage.delete_many(storage_keys).await?;
        tracing::info!(count = storage_keys.len(), "Attachments deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_passthrough() {
        assert_eq!(sanitize_filename("photo.JPG"), "photo.JPG");
        assert_eq!(sanitize_filename("report-v2_final.pdf"), "report-v2_final.pdf");
    }

    #[test]
    fn test_sanitize_filename_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my file (1).png"), "my_file__1_.png");
    }

    #[test]
    fn test_sanitize_filename_strips_directories() {
        assert_eq!(sanitize_filename("/tmp/photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    }

    #[test]
    fn test_sanitize_filename_rejects_empty() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("***"), "file");
    }
}
