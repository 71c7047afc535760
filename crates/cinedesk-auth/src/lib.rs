//! # cinedesk-auth
//!
//! Authentication primitives for the CineDesk back-office.
//!
//! - `jwt`: HS256 access/refresh token creation and validation
//! - `password`: Argon2id hashing and the password policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordPolicy};
