//! Core type definitions used across the CineDesk workspace.

pub mod id;
pub mod pagination;
pub mod search;
pub mod sorting;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use search::SearchTerm;
pub use sorting::SortDirection;
