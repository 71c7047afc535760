//! # cinedesk-storage
//!
//! Media storage for CineDesk: a local filesystem provider (default) and an
//! S3-compatible provider behind the `s3` feature, selected at startup by
//! [`StorageManager::from_config`].

pub mod key;
pub mod manager;
pub mod providers;

pub use manager::StorageManager;
