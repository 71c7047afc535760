//! Storage provider trait for pluggable media backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream used for streaming uploads.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Trait for media storage backends.
///
/// Keys are slash-separated relative paths such as
/// `images/posters/<uuid>.jpg`. Implementations exist for the local
/// filesystem and S3-compatible object stores in `cinedesk-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write a complete object.
    async fn write(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Write an object from a byte stream, returning the number of bytes stored.
    ///
    /// A failed stream must not leave a partial object behind.
    async fn write_stream(
        &self,
        key: &str,
        stream: ByteStream<'_>,
        content_type: Option<&str>,
    ) -> AppResult<u64>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Public URL under which the object is served.
    fn public_url(&self, key: &str) -> String;

    /// Inverse of [`public_url`](Self::public_url): recover the key from a
    /// URL this provider produced, or `None` for foreign URLs.
    fn key_from_url(&self, url: &str) -> Option<String>;
}
