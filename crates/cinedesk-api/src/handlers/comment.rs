//! Comment moderation handlers.

use axum::Json;
use axum::extract::{Path, State};

use cinedesk_entity::comment::Comment;

use crate::dto::ApiResponse;
use crate::dto::query::CommentQuery;
use crate::dto::request::VisibilityRequest;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/comments
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<CommentQuery>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    let filter = query.into_filter()?;
    let result = state
        .comment_service
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// PUT /api/comments/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<VisibilityRequest>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    let comment = state
        .comment_service
        .set_visibility(&admin, parse_path_id(&id)?, req.hidden)
        .await?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .comment_service
        .delete(&admin, parse_path_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::message("Comment deleted")))
}
