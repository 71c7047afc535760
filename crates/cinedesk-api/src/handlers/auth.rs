//! Back-office sign-in.

use axum::Json;
use axum::extract::State;

use cinedesk_auth::TokenPair;
use cinedesk_service::user::LoginResult;

use crate::dto::ApiResponse;
use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResult>>> {
    let result = state.auth_service.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<ApiResponse<TokenPair>>> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}
