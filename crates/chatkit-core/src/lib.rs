//! Chatkit Core Library
//!
//! This crate provides the domain models, configuration, content-type
//! classification, and upload validation shared across all chatkit
//! components.

pub mod config;
pub mod mime;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AttachmentConfig, StorageBackend};
pub use mime::AllowLists;
pub use models::{Attachment, MediaCategory, UploadCandidate};
pub use validation::{ValidationReport, Validator};
