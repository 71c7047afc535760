//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use cinedesk_core::config::AuthConfig;
use cinedesk_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates HS256 tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Decode a refresh token.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized("Invalid token"),
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::unauthorized("Invalid token type"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use chrono::Utc;
    use cinedesk_core::error::ErrorKind;
    use cinedesk_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_access_ttl_minutes: 15,
            jwt_refresh_ttl_hours: 24,
        }
    }

    fn admin() -> User {
        User {
            id: Uuid::new_v4(),
            username: "root".into(),
            email: None,
            password_hash: String::new(),
            display_name: None,
            avatar_url: None,
            role: UserRole::Admin,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let cfg = config("a-very-long-test-secret-of-32-bytes!!");
        let user = admin();
        let pair = JwtEncoder::new(&cfg).generate_token_pair(&user).unwrap();
        let decoder = JwtDecoder::new(&cfg);

        let claims = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert!(claims.is_admin());
        assert_eq!(claims.username, "root");

        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let cfg = config("a-very-long-test-secret-of-32-bytes!!");
        let pair = JwtEncoder::new(&cfg).generate_token_pair(&admin()).unwrap();
        let err = JwtDecoder::new(&cfg)
            .decode_access_token(&pair.refresh_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = JwtEncoder::new(&config("a-very-long-test-secret-of-32-bytes!!"))
            .generate_token_pair(&admin())
            .unwrap();
        let err = JwtDecoder::new(&config("another-secret-that-is-long-enough!!"))
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_garbage_rejected() {
        let decoder = JwtDecoder::new(&config("a-very-long-test-secret-of-32-bytes!!"));
        assert!(decoder.decode_access_token("not.a.jwt").is_err());
    }
}
