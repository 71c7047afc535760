//! Typed path parameter helpers.

use uuid::Uuid;

use cinedesk_core::AppResult;
use cinedesk_core::types::parse_id;

/// Parses the `{id}` path segment.
pub fn parse_path_id(raw: &str) -> AppResult<Uuid> {
    parse_id("id", raw)
}
