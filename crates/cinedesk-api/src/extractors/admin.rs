//! `AdminUser` extractor: pulls the JWT from the Authorization header,
//! validates it and requires the admin role.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use cinedesk_core::AppError;
use cinedesk_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated administrator available in handlers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl AdminUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;
        if !claims.is_admin() {
            tracing::warn!(user_id = %claims.sub, "Non-admin token rejected");
            return Err(AppError::forbidden("Admin access required").into());
        }

        Ok(AdminUser(RequestContext::from_claims(&claims)))
    }
}
