//! Admin user management: CRUD, role and status changes, password resets.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_auth::password::{PasswordHasher, PasswordPolicy};
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::UserRepository;
use cinedesk_entity::user::{CreateUser, UpdateUser, User, UserFilter, UserRole};

use crate::context::RequestContext;

/// Request to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
}

/// Admin changes to an existing user. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<PasswordPolicy>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
    ) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    pub async fn list(&self, filter: &UserFilter, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.users.list(filter, page).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a new user with a hashed password.
    pub async fn create(&self, ctx: &RequestContext, req: NewUser) -> AppResult<User> {
        let username = check_username(&req.username)?;
        let email = req.email.as_deref().map(check_email).transpose()?;
        self.policy.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
                display_name: req.display_name,
                avatar_url: req.avatar_url,
                role: req.role,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created by admin"
        );
        Ok(user)
    }

    /// Apply admin changes. Admins cannot demote or deactivate themselves,
    /// and the last administrator cannot be demoted.
    pub async fn update(&self, ctx: &RequestContext, id: Uuid, req: UserChanges) -> AppResult<User> {
        let is_self = ctx.user_id.into_uuid() == id;
        let demotes = req.role.is_some_and(|role| !role.is_admin());
        if is_self && demotes {
            return Err(AppError::forbidden("You cannot change your own role"));
        }
        if is_self && req.is_active == Some(false) {
            return Err(AppError::forbidden("You cannot deactivate your own account"));
        }

        let current = self.get(id).await?;
        if demotes && current.is_admin() && self.users.count_admins().await? <= 1 {
            return Err(AppError::conflict("Cannot demote the last administrator"));
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.policy.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .users
            .update(
                id,
                &UpdateUser {
                    email: req.email.as_deref().map(check_email).transpose()?,
                    display_name: req.display_name,
                    avatar_url: req.avatar_url,
                    role: req.role,
                    is_active: req.is_active,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %id,
            role = %user.role,
            is_active = user.is_active,
            password_reset = req.password.is_some(),
            "User updated by admin"
        );
        Ok(user)
    }

    /// Delete a user. Admins cannot delete themselves.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if ctx.user_id.into_uuid() == id {
            return Err(AppError::forbidden("You cannot delete your own account"));
        }
        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(admin_id = %ctx.user_id, user_id = %id, "User deleted by admin");
        Ok(())
    }
}

fn check_username(raw: &str) -> AppResult<String> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(3..=50).contains(&len) {
        return Err(AppError::invalid_field(
            "username",
            "username must be between 3 and 50 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::invalid_field(
            "username",
            "username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(username.to_string())
}

fn check_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::invalid_field("email", "email is not a valid address")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(check_username(" admin_01 ").unwrap(), "admin_01");
        assert!(check_username("ab").is_err());
        assert!(check_username("has space").is_err());
    }

    #[test]
    fn test_email_is_lowercased() {
        assert_eq!(check_email("Ops@CineDesk.io").unwrap(), "ops@cinedesk.io");
        assert!(check_email("nobody").is_err());
        assert!(check_email("@host.com").is_err());
    }
}
