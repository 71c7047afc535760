//! Upload rules: accepted extensions, folders, object keys and size limits.

use std::str::FromStr;

use futures::StreamExt;
use uuid::Uuid;

use cinedesk_core::traits::storage::ByteStream;
use cinedesk_core::{AppError, AppResult};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "mov", "m3u8"];

/// What is being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_EXTENSIONS,
            Self::Video => VIDEO_EXTENSIONS,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }

    /// Lowercased extension of `file_name` if this kind accepts it.
    pub fn extension_of(&self, file_name: &str) -> AppResult<String> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| self.extensions().contains(&ext.as_str()))
            .ok_or_else(|| {
                AppError::invalid_field(
                    "file",
                    format!(
                        "Unsupported file type: '{file_name}'. Allowed: {}",
                        self.extensions().join(", ")
                    ),
                )
            })?;
        Ok(ext)
    }

    /// Default content type for an accepted extension.
    pub fn content_type(ext: &str) -> &'static str {
        match ext {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "mp4" => "video/mp4",
            "webm" => "video/webm",
            "mkv" => "video/x-matroska",
            "mov" => "video/quicktime",
            "m3u8" => "application/vnd.apple.mpegurl",
            _ => "application/octet-stream",
        }
    }
}

/// Sub-folder for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Posters,
    Covers,
    Avatars,
    News,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posters => "posters",
            Self::Covers => "covers",
            Self::Avatars => "avatars",
            Self::News => "news",
        }
    }
}

impl FromStr for ImageFolder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posters" => Ok(Self::Posters),
            "covers" => Ok(Self::Covers),
            "avatars" => Ok(Self::Avatars),
            "news" => Ok(Self::News),
            _ => Err(AppError::invalid_field(
                "folder",
                format!("Invalid folder: '{s}'. Expected one of: posters, covers, avatars, news"),
            )),
        }
    }
}

/// Record whose `video_url` an uploaded video replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoTarget {
    Film(Uuid),
    Episode(Uuid),
}

/// Build a fresh object key: `<kind>/[<folder>/]<uuid>.<ext>`.
pub fn object_key(kind: MediaKind, folder: Option<&str>, ext: &str) -> String {
    let name = format!("{}.{ext}", Uuid::new_v4());
    match folder {
        Some(folder) => format!("{}/{folder}/{name}", kind.prefix()),
        None => format!("{}/{name}", kind.prefix()),
    }
}

/// Whether `key` lies in one of the upload prefixes.
pub fn is_media_key(key: &str) -> bool {
    key.starts_with("images/") || key.starts_with("videos/")
}

/// Fail the stream once more than `max_bytes` have passed through.
///
/// The error travels inside the `io::Error` so storage providers can hand
/// the original validation error back to the caller.
pub fn limit_stream(stream: ByteStream<'_>, max_bytes: u64) -> ByteStream<'_> {
    let mut seen: u64 = 0;
    Box::pin(stream.map(move |chunk| {
        let chunk = chunk?;
        seen += chunk.len() as u64;
        if seen > max_bytes {
            return Err(std::io::Error::other(AppError::invalid_field(
                "file",
                format!("File exceeds the maximum size of {max_bytes} bytes"),
            )));
        }
        Ok(chunk)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    #[test]
    fn test_extension_rules() {
        assert_eq!(MediaKind::Image.extension_of("Poster.JPG").unwrap(), "jpg");
        assert_eq!(MediaKind::Video.extension_of("ep1.m3u8").unwrap(), "m3u8");
        assert!(MediaKind::Image.extension_of("clip.mp4").is_err());
        assert!(MediaKind::Video.extension_of("noext").is_err());
    }

    #[test]
    fn test_object_key_layout() {
        let key = object_key(MediaKind::Image, Some("posters"), "png");
        assert!(key.starts_with("images/posters/"));
        assert!(key.ends_with(".png"));
        let key = object_key(MediaKind::Video, None, "mp4");
        assert!(key.starts_with("videos/") && key.matches('/').count() == 1);
        assert!(is_media_key(&key));
        assert!(!is_media_key("secrets/x"));
    }

    #[test]
    fn test_folder_parse() {
        assert_eq!("Covers".parse::<ImageFolder>().unwrap(), ImageFolder::Covers);
        assert!("../etc".parse::<ImageFolder>().is_err());
    }

    #[tokio::test]
    async fn test_limit_stream_rejects_oversize() {
        let chunks = vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"12345")),
            Ok(Bytes::from_static(b"67890")),
        ];
        let mut limited = limit_stream(Box::pin(stream::iter(chunks)), 8);
        assert!(limited.next().await.unwrap().is_ok());
        let err = limited.next().await.unwrap().unwrap_err();
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<AppError>()).unwrap();
        assert!(inner.message.contains("maximum size"));
    }
}
