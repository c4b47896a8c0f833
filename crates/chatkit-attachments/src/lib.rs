//! Chatkit Attachments Library
//!
//! Upload orchestration for chat attachments: the validation and
//! classification gates, collision-resistant storage-key generation, the
//! backing-store write, and the video upload variant that derives a
//! still-frame thumbnail.

pub mod naming;
pub mod thumbnail;
pub mod uploader;

// Re-export commonly used types
pub use naming::{Clock, KeyGenerator, RandomTokens, SystemClock, TokenSource};
pub use thumbnail::{FfmpegStillFrameExtractor, StillFrameExtractor};
pub use uploader::{AttachmentUploader, DeleteError, UploadError};
