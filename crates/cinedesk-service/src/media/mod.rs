//! Image and video uploads to object storage.

pub mod rules;
pub mod service;

pub use rules::{ImageFolder, MediaKind, VideoTarget};
pub use service::{MediaService, StoredMedia, video_target};
