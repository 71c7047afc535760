//! The acting administrator of a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinedesk_auth::Claims;
use cinedesk_core::types::UserId;
use cinedesk_entity::user::UserRole;

/// Who is performing an action.
///
/// Built by the HTTP admin extractor from verified token claims and passed
/// into every service method that records or checks the actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Username from the token, for log lines.
    pub username: String,
}

impl RequestContext {
    pub fn new(user_id: UserId, role: UserRole, username: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            username: username.into(),
        }
    }

    /// Build a context from verified access-token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self::new(
            UserId::from_uuid(claims.sub),
            claims.role,
            claims.username.clone(),
        )
    }

    /// Context for actions run from the command line rather than over HTTP.
    pub fn system(username: impl Into<String>) -> Self {
        Self::new(UserId::from_uuid(Uuid::nil()), UserRole::Admin, username)
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
