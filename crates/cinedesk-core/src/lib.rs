//! # cinedesk-core
//!
//! Core crate for the CineDesk back-office. Contains configuration schemas,
//! typed identifiers, pagination/sorting/search types, the storage provider
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CineDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
