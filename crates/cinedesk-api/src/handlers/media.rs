//! Media upload handlers.
//!
//! The `file` part is streamed straight into storage. Image uploads read
//! `folder` before the file, so it must come first in the form; video
//! target fields may appear on either side of the file.

use std::io;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use futures::TryStreamExt;
use serde::Serialize;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::traits::storage::ByteStream;
use cinedesk_core::types::parse_optional_id;
use cinedesk_service::media::{ImageFolder, StoredMedia, video_target};

use crate::dto::ApiResponse;
use crate::dto::request::DeleteMediaRequest;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AdminUser, ValidatedJson};
use crate::state::AppState;

/// `{ success, url, fileName, size }`
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(flatten)]
    pub media: StoredMedia,
}

impl From<StoredMedia> for UploadResponse {
    fn from(media: StoredMedia) -> Self {
        Self {
            success: true,
            media,
        }
    }
}

fn body_stream<'a>(field: Field<'a>) -> ByteStream<'a> {
    Box::pin(field.map_err(io::Error::other))
}

fn upload_parts(field: &Field<'_>) -> Result<(String, Option<String>), AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::invalid_field("file", "file must have a file name"))?;
    Ok((file_name, field.content_type().map(str::to_string)))
}

/// POST /api/media/images
pub async fn upload_image(
    State(state): State<AppState>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut folder: Option<ImageFolder> = None;
    let mut stored: Option<StoredMedia> = None;

    while let Some(field) = next_field(&mut multipart, &state, &admin, stored.as_ref()).await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "folder" => {
                if let Some(media) = stored.take() {
                    discard(&state, &admin, &media).await;
                    return Err(AppError::bad_request(
                        "The folder field must come before the file field",
                    )
                    .into());
                }
                let text = field.text().await?;
                folder = match text.trim() {
                    "" => None,
                    value => Some(value.parse()?),
                };
            }
            "file" => {
                if let Some(media) = stored.take() {
                    discard(&state, &admin, &media).await;
                    return Err(AppError::bad_request("Only one file may be uploaded").into());
                }
                let (file_name, content_type) = upload_parts(&field)?;
                let media = state
                    .media_service
                    .upload_image(
                        &admin,
                        &file_name,
                        content_type.as_deref(),
                        folder,
                        body_stream(field),
                    )
                    .await?;
                stored = Some(media);
            }
            _ => {}
        }
    }

    let media = stored.ok_or_else(|| AppError::invalid_field("file", "file is required"))?;
    Ok((StatusCode::CREATED, Json(media.into())))
}

/// Form values collected from a video upload.
#[derive(Default)]
struct VideoForm {
    film_id: Option<Uuid>,
    episode_id: Option<Uuid>,
    stored: Option<StoredMedia>,
}

/// POST /api/media/videos
///
/// With `filmId` or `episodeId` the target's video is replaced by the upload
/// and the previous object is removed.
pub async fn upload_video(
    State(state): State<AppState>,
    admin: AdminUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let mut form = VideoForm::default();

    if let Err(e) = read_video_form(&state, &admin, &mut multipart, &mut form).await {
        if let Some(media) = &form.stored {
            discard(&state, &admin, media).await;
        }
        return Err(e);
    }

    let media = form
        .stored
        .ok_or_else(|| AppError::invalid_field("file", "file is required"))?;

    let target = match video_target(form.film_id, form.episode_id) {
        Ok(target) => target,
        Err(e) => {
            discard(&state, &admin, &media).await;
            return Err(e.into());
        }
    };
    if let Some(target) = target {
        state
            .media_service
            .attach_video(&admin, target, &media)
            .await?;
    }

    Ok((StatusCode::CREATED, Json(media.into())))
}

async fn read_video_form(
    state: &AppState,
    admin: &AdminUser,
    multipart: &mut Multipart,
    form: &mut VideoForm,
) -> ApiResult<()> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "filmId" => {
                let text = field.text().await?;
                form.film_id = parse_optional_id("filmId", Some(&text))?;
            }
            "episodeId" => {
                let text = field.text().await?;
                form.episode_id = parse_optional_id("episodeId", Some(&text))?;
            }
            "file" => {
                if form.stored.is_some() {
                    return Err(AppError::bad_request("Only one file may be uploaded").into());
                }
                let (file_name, content_type) = upload_parts(&field)?;
                let media = state
                    .media_service
                    .upload_video(admin, &file_name, content_type.as_deref(), body_stream(field))
                    .await?;
                form.stored = Some(media);
            }
            _ => {}
        }
    }
    Ok(())
}

/// DELETE /api/media
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<DeleteMediaRequest>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.media_service.delete(&admin, &req.file_name).await?;
    Ok(Json(ApiResponse::message("File deleted")))
}

/// Read the next form part, removing an already stored upload when the
/// form turns out to be malformed.
async fn next_field<'a>(
    multipart: &'a mut Multipart,
    state: &AppState,
    admin: &AdminUser,
    stored: Option<&StoredMedia>,
) -> ApiResult<Option<Field<'a>>> {
    match multipart.next_field().await {
        Ok(field) => Ok(field),
        Err(e) => {
            if let Some(media) = stored {
                discard(state, admin, media).await;
            }
            Err(ApiError::from(e))
        }
    }
}

async fn discard(state: &AppState, admin: &AdminUser, media: &StoredMedia) {
    if let Err(e) = state.media_service.delete(admin, &media.file_name).await {
        tracing::warn!(key = %media.file_name, error = %e, "Failed to discard upload");
    }
}
