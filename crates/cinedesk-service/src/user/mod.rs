//! User accounts and back-office sign-in.

pub mod admin;
pub mod auth;

pub use admin::{AdminUserService, NewUser, UserChanges};
pub use auth::{AuthService, LoginResult};
