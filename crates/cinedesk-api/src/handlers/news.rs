//! News article handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinedesk_entity::news::News;

use crate::dto::ApiResponse;
use crate::dto::query::NewsQuery;
use crate::dto::request::{CreateNewsRequest, UpdateNewsRequest};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/news
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<NewsQuery>,
) -> ApiResult<Json<ApiResponse<News>>> {
    let result = state
        .news_service
        .list(&query.into_filter(), &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/news
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateNewsRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<News>>)> {
    let article = state.news_service.create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(article))))
}

/// GET /api/news/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<News>>> {
    let article = state.news_service.get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// PUT /api/news/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateNewsRequest>,
) -> ApiResult<Json<ApiResponse<News>>> {
    let article = state
        .news_service
        .update(&admin, parse_path_id(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// DELETE /api/news/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.news_service.delete(&admin, parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::message("News deleted")))
}
