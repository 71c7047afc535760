//! # cinedesk-database
//!
//! PostgreSQL connection management, the migration runner, one repository
//! per table, and the store traits the service layer writes transactional
//! workflows against.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
