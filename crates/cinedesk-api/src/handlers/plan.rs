//! Subscription plan handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinedesk_entity::plan::Plan;

use crate::dto::ApiResponse;
use crate::dto::query::PlanQuery;
use crate::dto::request::{CreatePlanRequest, UpdatePlanRequest};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// GET /api/plans
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<PlanQuery>,
) -> ApiResult<Json<ApiResponse<Plan>>> {
    let result = state
        .plan_service
        .list(query.active, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/plans
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Plan>>)> {
    let plan = state.plan_service.create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(plan))))
}

/// GET /api/plans/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Plan>>> {
    let plan = state.plan_service.get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(plan)))
}

/// PUT /api/plans/{id}
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePlanRequest>,
) -> ApiResult<Json<ApiResponse<Plan>>> {
    let plan = state
        .plan_service
        .update(&admin, parse_path_id(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(plan)))
}

/// DELETE /api/plans/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.plan_service.delete(&admin, parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::message("Plan deleted")))
}
