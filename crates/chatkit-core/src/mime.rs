//! Content-type allow-lists and category classification.

use crate::models::MediaCategory;

/// Image content types accepted for upload.
pub const IMAGE_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Video content types accepted for upload.
pub const VIDEO_CONTENT_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/ogg",
    "video/quicktime",
];

/// Audio content types accepted for upload.
pub const AUDIO_CONTENT_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/ogg",
    "audio/webm",
    "audio/mp4",
    "audio/x-m4a",
];

/// Document content types accepted for upload. These classify as
/// [`MediaCategory::File`].
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/plain",
    "text/csv",
    "application/zip",
];

/// The four content-type allow-lists, one per category.
///
/// `Default` carries the built-in tables; deployments can override any
/// list through configuration. Matching is case-insensitive on the
/// content type.
#[derive(Debug, Clone)]
pub struct AllowLists {
    pub image: Vec<String>,
    pub video: Vec<String>,
    pub audio: Vec<String>,
    pub document: Vec<String>,
}

impl Default for AllowLists {
    fn default() -> Self {
        let owned = |table: &[&str]| -> Vec<String> {
            table.iter().map(|t| t.to_string()).collect()
        };
        Self {
            image: owned(IMAGE_CONTENT_TYPES),
            video: owned(VIDEO_CONTENT_TYPES),
            audio: owned(AUDIO_CONTENT_TYPES),
            document: owned(DOCUMENT_CONTENT_TYPES),
        }
    }
}

impl AllowLists {
    /// Classify a content type into its category.
    ///
    /// Checks the lists in fixed order (image, video, audio) and returns
    /// the first match. Everything else, document types included, is
    /// `File`. Total: never fails, never errors.
    pub fn classify(&self, content_type: &str) -> MediaCategory {
        let normalized = content_type.to_ascii_lowercase();
        if self.image.iter().any(|t| t == &normalized) {
            MediaCategory::Image
        } else if self.video.iter().any(|t| t == &normalized) {
            MediaCategory::Video
        } else if self.audio.iter().any(|t| t == &normalized) {
            MediaCategory::Audio
        } else {
            MediaCategory::File
        }
    }

    /// Whether the content type appears in the union of all four lists.
    pub fn is_allowed(&self, content_type: &str) -> bool {
        let normalized = content_type.to_ascii_lowercase();
        [&self.image, &self.video, &self.audio, &self.document]
            .iter()
            .any(|list| list.iter().any(|t| t == &normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_image() {
        let lists = AllowLists::default();
        assert_eq!(lists.classify("image/jpeg"), MediaCategory::Image);
        assert_eq!(lists.classify("image/png"), MediaCategory::Image);
    }

    #[test]
    fn test_classify_video_and_audio() {
        let lists = AllowLists::default();
        assert_eq!(lists.classify("video/mp4"), MediaCategory::Video);
        assert_eq!(lists.classify("audio/mpeg"), MediaCategory::Audio);
    }

    #[test]
    fn test_classify_document_is_file() {
        let lists = AllowLists::default();
        assert_eq!(lists.classify("application/pdf"), MediaCategory::File);
        assert_eq!(lists.classify("text/csv"), MediaCategory::File);
    }

    #[test]
    fn test_classify_unmatched_defaults_to_file() {
        let lists = AllowLists::default();
        assert_eq!(lists.classify("application/x-unknown"), MediaCategory::File);
        assert_eq!(lists.classify(""), MediaCategory::File);
        assert_eq!(lists.classify("not a mime type"), MediaCategory::File);
    }

    #[test]
    fn test_classify_case_insensitive() {
        let lists = AllowLists::default();
        assert_eq!(lists.classify("IMAGE/JPEG"), MediaCategory::Image);
        assert_eq!(lists.classify("Video/MP4"), MediaCategory::Video);
    }

    #[test]
    fn test_is_allowed_union() {
        let lists = AllowLists::default();
        assert!(lists.is_allowed("image/jpeg"));
        assert!(lists.is_allowed("video/webm"));
        assert!(lists.is_allowed("audio/wav"));
        assert!(lists.is_allowed("application/pdf"));
        assert!(!lists.is_allowed("application/x-unknown"));
    }
}
