//! Data transfer objects for requests and responses.

pub mod query;
pub mod request;
pub mod response;

pub use response::{ApiResponse, Pagination};
