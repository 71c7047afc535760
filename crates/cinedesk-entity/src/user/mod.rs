//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, UpdateUser, User, UserFilter};
pub use role::UserRole;
