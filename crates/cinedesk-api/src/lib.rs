//! # cinedesk-api
//!
//! HTTP layer for the CineDesk back-office: the Axum router, the admin
//! gate, request DTOs validated with `validator`, the response envelope and
//! the mapping from [`cinedesk_core::AppError`] to status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
