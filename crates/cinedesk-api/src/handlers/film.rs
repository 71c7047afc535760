//! Film handlers, including the nested subscriber and episode listings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinedesk_entity::episode::Episode;
use cinedesk_entity::film::Film;
use cinedesk_entity::subscriber::SubscriberView;

use crate::dto::ApiResponse;
use crate::dto::query::FilmQuery;
use crate::dto::request::{CreateEpisodeRequest, CreateFilmRequest, UpdateFilmRequest};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/films
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<FilmQuery>,
) -> ApiResult<Json<ApiResponse<Film>>> {
    let filter = query.into_filter()?;
    let result = state
        .film_service
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/films
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateFilmRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Film>>)> {
    let film = state.film_service.create(&admin, req.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(film))))
}

/// GET /api/films/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Film>>> {
    let film = state.film_service.get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(film)))
}

/// PUT /api/films/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFilmRequest>,
) -> ApiResult<Json<ApiResponse<Film>>> {
    let film = state
        .film_service
        .update(&admin, parse_path_id(&id)?, req.into_update()?)
        .await?;
    Ok(Json(ApiResponse::ok(film)))
}

/// DELETE /api/films/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.film_service.delete(&admin, parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Film deleted")))
}

/// GET /api/films/{id}/subscribers
pub async fn subscribers(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> ApiResult<Json<ApiResponse<SubscriberView>>> {
    let result = state
        .film_service
        .subscribers(parse_path_id(&id)?, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// GET /api/films/{id}/episodes
pub async fn episodes(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> ApiResult<Json<ApiResponse<Episode>>> {
    let result = state
        .episode_service
        .list_by_film(parse_path_id(&id)?, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/films/{id}/episodes
pub async fn create_episode(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateEpisodeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Episode>>)> {
    let episode = state
        .episode_service
        .create(&admin, parse_path_id(&id)?, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(episode))))
}
