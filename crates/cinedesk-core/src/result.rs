//! Convenience result type alias for CineDesk.

use crate::error::AppError;

/// A specialized `Result` type for CineDesk operations.
pub type AppResult<T> = Result<T, AppError>;
