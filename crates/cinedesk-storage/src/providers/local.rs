//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use cinedesk_core::error::{AppError, ErrorKind};
use cinedesk_core::result::AppResult;
use cinedesk_core::traits::{ByteStream, StorageProvider};

use crate::key::{join_url, strip_base, validate_key};

/// Stores objects as files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the directory.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.to_string(),
        })
    }

    /// Root directory served as static media.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn copy_stream(path: &Path, stream: ByteStream<'_>) -> std::io::Result<u64> {
        let mut file = fs::File::create(path).await?;
        let mut reader = StreamReader::new(stream);
        let written = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;
        Ok(written)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn write(&self, key: &str, data: Bytes, _content_type: Option<&str>) -> AppResult<()> {
        let path = self.resolve(key)?;
        self.ensure_parent(&path).await?;

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write object: {key}"), e)
        })?;

        debug!(key, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn write_stream(
        &self,
        key: &str,
        stream: ByteStream<'_>,
        _content_type: Option<&str>,
    ) -> AppResult<u64> {
        let path = self.resolve(key)?;
        self.ensure_parent(&path).await?;

        match Self::copy_stream(&path, stream).await {
            Ok(written) => {
                debug!(key, bytes = written, "Wrote object from stream");
                Ok(written)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&path).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!(key, error = %cleanup, "Failed to remove partial object");
                    }
                }
                Err(stream_error(key, e))
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.resolve(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        strip_base(&self.public_base_url, url)
    }
}

/// Errors raised by the body stream itself (size limit, client abort) are
/// wrapped as `AppError` by the caller; surface those unchanged.
fn stream_error(key: &str, e: std::io::Error) -> AppError {
    let passthrough = e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<AppError>())
        .cloned();
    match passthrough {
        Some(app) => app,
        None => AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to store object: {key}"),
            e,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    async fn provider(dir: &tempfile::TempDir) -> LocalStorageProvider {
        LocalStorageProvider::new(dir.path().to_str().unwrap(), "/media")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_write_exists_delete() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        provider
            .write("images/posters/a.jpg", Bytes::from("jpeg"), Some("image/jpeg"))
            .await
            .unwrap();
        assert!(provider.exists("images/posters/a.jpg").await.unwrap());
        assert_eq!(
            std::fs::read(dir.path().join("images/posters/a.jpg")).unwrap(),
            b"jpeg"
        );

        provider.delete("images/posters/a.jpg").await.unwrap();
        assert!(!provider.exists("images/posters/a.jpg").await.unwrap());
        // Deleting again is not an error.
        provider.delete("images/posters/a.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_stream() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let chunks = stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from("hello ")),
            Ok(Bytes::from("world")),
        ]);
        let written = provider
            .write_stream("videos/films/a.mp4", Box::pin(chunks), None)
            .await
            .unwrap();
        assert_eq!(written, 11);
        assert!(provider.exists("videos/films/a.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_stream_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let chunks = stream::iter(vec![
            Ok(Bytes::from("partial")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "client went away")),
        ]);
        let err = provider
            .write_stream("videos/films/b.mp4", Box::pin(chunks), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(!provider.exists("videos/films/b.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_stream_app_error_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let limit = AppError::validation("File exceeds the maximum size");
        let chunks = stream::iter(vec![
            Ok(Bytes::from("abc")),
            Err(std::io::Error::other(limit)),
        ]);
        let err = provider
            .write_stream("videos/films/c.mp4", Box::pin(chunks), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;
        let err = provider
            .write("../outside.txt", Bytes::from("x"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;
        let url = provider.public_url("images/covers/x.png");
        assert_eq!(url, "/media/images/covers/x.png");
        assert_eq!(
            provider.key_from_url(&url).as_deref(),
            Some("images/covers/x.png")
        );
    }
}
