//! Review moderation handlers.

use axum::Json;
use axum::extract::{Path, State};

use cinedesk_entity::review::Review;

use crate::dto::ApiResponse;
use crate::dto::query::ReviewQuery;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, parse_path_id};
use crate::state::AppState;

/// GET /api/reviews
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<ReviewQuery>,
) -> ApiResult<Json<ApiResponse<Review>>> {
    let filter = query.into_filter()?;
    let result = state
        .review_service
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .review_service
        .delete(&admin, parse_path_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::message("Review deleted")))
}
