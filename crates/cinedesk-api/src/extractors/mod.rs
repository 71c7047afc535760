//! Custom Axum extractors.

pub mod admin;
pub mod json;
pub mod pagination;
pub mod path;
pub mod query;

pub use admin::AdminUser;
pub use json::ValidatedJson;
pub use pagination::PaginationParams;
pub use path::parse_path_id;
pub use query::QueryParams;
