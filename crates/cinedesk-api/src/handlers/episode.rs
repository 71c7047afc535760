//! Episode handlers. Creation and listing live under the parent film.

use axum::Json;
use axum::extract::{Path, State};

use cinedesk_entity::episode::Episode;

use crate::dto::ApiResponse;
use crate::dto::request::UpdateEpisodeRequest;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/episodes/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Episode>>> {
    let episode = state.episode_service.get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(episode)))
}

/// PUT /api/episodes/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateEpisodeRequest>,
) -> ApiResult<Json<ApiResponse<Episode>>> {
    let episode = state
        .episode_service
        .update(&admin, parse_path_id(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(episode)))
}

/// DELETE /api/episodes/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .episode_service
        .delete(&admin, parse_path_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::message("Episode deleted")))
}
