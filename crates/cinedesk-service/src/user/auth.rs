//! Back-office sign-in and token refresh.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use cinedesk_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use cinedesk_auth::password::PasswordHasher;
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::UserRepository;
use cinedesk_entity::user::User;

/// Tokens issued on login together with the signed-in user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: User,
}

/// Issues tokens to active administrators.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthService {
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Unknown users, wrong passwords and non-admin accounts all get the
    /// same error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let invalid = || AppError::unauthorized("Invalid username or password");

        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            warn!(username = %username, "Login attempt for unknown user");
            return Err(invalid());
        };
        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid());
        }
        if !user.can_access_backoffice() {
            warn!(user_id = %user.id, role = %user.role, "Login refused for non-admin or inactive account");
            return Err(invalid());
        }

        self.users.touch_login(user.id).await?;
        let tokens = self.encoder.generate_token_pair(&user)?;
        info!(user_id = %user.id, username = %user.username, "Admin logged in");
        Ok(LoginResult { tokens, user })
    }

    /// Exchange a refresh token for a new pair if the account still qualifies.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .filter(User::can_access_backoffice)
            .ok_or_else(|| AppError::unauthorized("Account is no longer allowed to sign in"))?;
        self.encoder.generate_token_pair(&user)
    }
}
