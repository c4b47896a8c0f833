//! Chatkit Storage Library
//!
//! Storage abstraction and backends for chat attachments. The
//! [`ObjectStorage`] trait models the backing-store capability (put,
//! public URL, delete) and is implemented for S3-compatible stores and
//! the local filesystem.
//!
//! # Storage key format
//!
//! Keys are produced by the attachments crate as
//! `{category}/{conversation_id}/{timestamp}_{token}.{ext}`. Keys must
//! not contain `..` or a leading `/`; backends reject such keys rather
//! than resolving them.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalObjectStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3ObjectStorage;
pub use traits::{ObjectStorage, PutOptions, StorageError, StorageResult};
