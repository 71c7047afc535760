//! Member handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinedesk_entity::member::{Member, MemberRemoval};

use crate::dto::ApiResponse;
use crate::dto::query::MemberQuery;
use crate::dto::request::{CreateMemberRequest, UpdateMemberRequest};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/members
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<MemberQuery>,
) -> ApiResult<Json<ApiResponse<Member>>> {
    let filter = query.into_filter()?;
    let result = state
        .member_service
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/members
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Member>>)> {
    let member = state
        .member_service
        .create(&admin, req.into_create()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(member))))
}

/// GET /api/members/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Member>>> {
    let member = state.member_service.get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// PUT /api/members/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<ApiResponse<Member>>> {
    let member = state
        .member_service
        .update(&admin, parse_path_id(&id)?, req.into_update()?)
        .await?;
    Ok(Json(ApiResponse::ok(member)))
}

/// DELETE /api/members/{id}
///
/// Also strips the member from every film's actor and translator lists.
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MemberRemoval>>> {
    let removal = state
        .member_service
        .delete(&admin, parse_path_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(removal).with_message("Member deleted")))
}
