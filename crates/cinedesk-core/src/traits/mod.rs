//! Core traits defined in `cinedesk-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, StorageProvider};
