//! Streaming uploads and the video replacement workflow.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use cinedesk_core::config::StorageConfig;
use cinedesk_core::traits::storage::ByteStream;
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::{EpisodeRepository, FilmRepository};
use cinedesk_storage::StorageManager;
use cinedesk_storage::key::validate_key;

use super::rules::{self, ImageFolder, MediaKind, VideoTarget};
use crate::context::RequestContext;

/// Where an upload ended up.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMedia {
    /// Public URL of the object.
    pub url: String,
    /// Object key, used to delete it later.
    pub file_name: String,
    /// Bytes written.
    pub size: u64,
}

/// Uploads media and keeps film and episode video URLs in step.
#[derive(Debug, Clone)]
pub struct MediaService {
    storage: Arc<StorageManager>,
    films: Arc<FilmRepository>,
    episodes: Arc<EpisodeRepository>,
    max_image_bytes: u64,
    max_video_bytes: u64,
}

impl MediaService {
    pub fn new(
        storage: Arc<StorageManager>,
        films: Arc<FilmRepository>,
        episodes: Arc<EpisodeRepository>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            storage,
            films,
            episodes,
            max_image_bytes: config.max_image_bytes,
            max_video_bytes: config.max_video_bytes,
        }
    }

    /// Store an image under `images/[<folder>/]<uuid>.<ext>`.
    pub async fn upload_image(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        content_type: Option<&str>,
        folder: Option<ImageFolder>,
        stream: ByteStream<'_>,
    ) -> AppResult<StoredMedia> {
        let ext = MediaKind::Image.extension_of(file_name)?;
        let key = rules::object_key(MediaKind::Image, folder.map(|f| f.as_str()), &ext);
        let stored = self
            .store(&key, &ext, content_type, rules::limit_stream(stream, self.max_image_bytes))
            .await?;
        info!(admin_id = %ctx.user_id, key = %stored.file_name, size = stored.size, "Image uploaded");
        Ok(stored)
    }

    /// Store a video under `videos/<uuid>.<ext>`.
    pub async fn upload_video(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        content_type: Option<&str>,
        stream: ByteStream<'_>,
    ) -> AppResult<StoredMedia> {
        let ext = MediaKind::Video.extension_of(file_name)?;
        let key = rules::object_key(MediaKind::Video, None, &ext);
        let stored = self
            .store(&key, &ext, content_type, rules::limit_stream(stream, self.max_video_bytes))
            .await?;
        info!(admin_id = %ctx.user_id, key = %stored.file_name, size = stored.size, "Video uploaded");
        Ok(stored)
    }

    /// Point the target's `video_url` at an uploaded video and remove the
    /// object it replaces.
    ///
    /// When the target does not exist the uploaded object is removed again
    /// and the call fails with not found.
    pub async fn attach_video(
        &self,
        ctx: &RequestContext,
        target: VideoTarget,
        media: &StoredMedia,
    ) -> AppResult<()> {
        let replaced = match target {
            VideoTarget::Film(id) => self.films.replace_video_url(id, &media.url).await,
            VideoTarget::Episode(id) => self.episodes.replace_video_url(id, &media.url).await,
        };

        let previous = match replaced {
            Ok(Some(previous)) => previous,
            Ok(None) => {
                self.discard(&media.file_name).await;
                return Err(AppError::not_found(match target {
                    VideoTarget::Film(_) => "Film not found",
                    VideoTarget::Episode(_) => "Episode not found",
                }));
            }
            Err(e) => {
                self.discard(&media.file_name).await;
                return Err(e);
            }
        };

        info!(admin_id = %ctx.user_id, video_target = ?target, url = %media.url, "Video attached");

        let old_key = previous
            .as_deref()
            .filter(|url| *url != media.url)
            .and_then(|url| self.storage.provider().key_from_url(url));
        if let Some(old_key) = old_key {
            self.discard(&old_key).await;
        }
        Ok(())
    }

    /// Remove an uploaded object by key.
    pub async fn delete(&self, ctx: &RequestContext, file_name: &str) -> AppResult<()> {
        let key = file_name.trim();
        validate_key(key)?;
        if !rules::is_media_key(key) {
            return Err(AppError::invalid_field(
                "fileName",
                "fileName must refer to an uploaded image or video",
            ));
        }

        let provider = self.storage.provider();
        if !provider.exists(key).await? {
            return Err(AppError::not_found("File not found"));
        }
        provider.delete(key).await?;
        info!(admin_id = %ctx.user_id, key = %key, "Media deleted");
        Ok(())
    }

    async fn store(
        &self,
        key: &str,
        ext: &str,
        content_type: Option<&str>,
        stream: ByteStream<'_>,
    ) -> AppResult<StoredMedia> {
        let provider = self.storage.provider();
        let content_type = content_type
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .unwrap_or_else(|| MediaKind::content_type(ext));
        let size = provider.write_stream(key, stream, Some(content_type)).await?;

        Ok(StoredMedia {
            url: provider.public_url(key),
            file_name: key.to_string(),
            size,
        })
    }

    /// Best-effort removal; a leftover object is logged, not surfaced.
    async fn discard(&self, key: &str) {
        if let Err(e) = self.storage.provider().delete(key).await {
            warn!(key = %key, error = %e, "Failed to remove media object");
        }
    }
}

/// Parse the optional target fields of a video upload. At most one may be set.
pub fn video_target(film_id: Option<Uuid>, episode_id: Option<Uuid>) -> AppResult<Option<VideoTarget>> {
    match (film_id, episode_id) {
        (Some(_), Some(_)) => Err(AppError::invalid_field(
            "episodeId",
            "Provide either filmId or episodeId, not both",
        )),
        (Some(film), None) => Ok(Some(VideoTarget::Film(film))),
        (None, Some(episode)) => Ok(Some(VideoTarget::Episode(episode))),
        (None, None) => Ok(None),
    }
}
