pub mod media;
pub mod message;

pub use media::{Attachment, MediaCategory, UploadCandidate};
pub use message::{MediaGroupFile, MediaGroupMessage, MediaMessage, MessageType};
