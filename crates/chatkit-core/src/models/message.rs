//! Message metadata shapes consumed by chat-message persistence.
//!
//! These structs define the wire format the composer embeds into outgoing
//! messages: a single-file message tagged with the attachment's category,
//! or a `media_group` message carrying an ordered list of files.

use serde::{Deserialize, Serialize};

use super::media::{Attachment, MediaCategory};

/// Message type tag. Matches `MediaCategory` for single-file messages,
/// plus the `media_group` variant for multi-file messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Image,
    Video,
    Audio,
    File,
    MediaGroup,
}

impl From<MediaCategory> for MessageType {
    fn from(category: MediaCategory) -> Self {
        match category {
            MediaCategory::Image => MessageType::Image,
            MediaCategory::Video => MessageType::Video,
            MediaCategory::Audio => MessageType::Audio,
            MediaCategory::File => MessageType::File,
        }
    }
}

/// Metadata for a single-file message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMessage {
    pub message_type: MessageType,
    pub media_url: String,
    pub media_name: String,
    pub media_size: i64,
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl From<&Attachment> for MediaMessage {
    fn from(attachment: &Attachment) -> Self {
        Self {
            message_type: attachment.category.into(),
            media_url: attachment.url.clone(),
            media_name: attachment.original_name.clone(),
            media_size: attachment.size_bytes,
            media_type: attachment.content_type.clone(),
            thumbnail_url: attachment.thumbnail_url.clone(),
        }
    }
}

/// One entry of a `media_group` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaGroupFile {
    pub category: MediaCategory,
    pub url: String,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl From<&Attachment> for MediaGroupFile {
    fn from(attachment: &Attachment) -> Self {
        Self {
            category: attachment.category,
            url: attachment.url.clone(),
            name: attachment.original_name.clone(),
            size: attachment.size_bytes,
            content_type: attachment.content_type.clone(),
            thumbnail_url: attachment.thumbnail_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaGroupMetadata {
    #[serde(rename = "mediaFiles")]
    pub media_files: Vec<MediaGroupFile>,
}

/// Metadata for a multi-file message. Order of `media_files` follows the
/// order the attachments were passed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaGroupMessage {
    pub message_type: MessageType,
    pub metadata: MediaGroupMetadata,
}

impl MediaGroupMessage {
    pub fn new(attachments: &[Attachment]) -> Self {
        Self {
            message_type: MessageType::MediaGroup,
            metadata: MediaGroupMetadata {
                media_files: attachments.iter().map(MediaGroupFile::from).collect(),
            },
        }
    }
}
