use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Attachment category, derived from the declared content type.
///
/// `File` is the documented default arm: every content type that matches
/// none of the image/video/audio allow-lists (including the document
/// allow-list) classifies as `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
    File,
}

impl MediaCategory {
    /// Lowercase name used in storage keys and message metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Image => "image",
            MediaCategory::Video => "video",
            MediaCategory::Audio => "audio",
            MediaCategory::File => "file",
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file selected by the user, not yet validated or uploaded.
///
/// Transient; exists only for the duration of one upload call.
#[derive(Clone, Debug)]
pub struct UploadCandidate {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadCandidate {
    pub fn new(
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Extension of the original name: the substring after the last `.`,
    /// empty if the name has no dot. Case is preserved.
    pub fn extension(&self) -> &str {
        self.original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("")
    }
}

/// Immutable record returned after a successful upload.
///
/// Owned by the caller (the chat-message composer), which embeds it into
/// outgoing message metadata. `thumbnail_key` is recorded so callers can
/// clean up a video thumbnail alongside the video; `delete` itself never
/// cascades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub storage_key: String,
    pub original_name: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub category: MediaCategory,
    pub thumbnail_url: Option<String>,
    pub thumbnail_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(MediaCategory::Image.as_str(), "image");
        assert_eq!(MediaCategory::File.as_str(), "file");
    }

    #[test]
    fn test_candidate_extension() {
        let c = UploadCandidate::new("photo.JPG", "image/jpeg", vec![0u8; 4]);
        assert_eq!(c.extension(), "JPG");

        let c = UploadCandidate::new("archive.tar.gz", "application/gzip", Bytes::new());
        assert_eq!(c.extension(), "gz");

        let c = UploadCandidate::new("README", "text/plain", Bytes::new());
        assert_eq!(c.extension(), "");
    }

    #[test]
    fn test_candidate_size() {
        let c = UploadCandidate::new("a.bin", "application/octet-stream", vec![0u8; 1024]);
        assert_eq!(c.size_bytes(), 1024);
    }
}
