//! Film reviews written by users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A rating plus text left by a user on a film.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub film_id: Uuid,
    pub user_id: Uuid,
    /// Score between 1 and 10.
    pub rating: i16,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin list filter for reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    /// Restrict to one film.
    pub film_id: Option<Uuid>,
    /// Restrict to one author.
    pub user_id: Option<Uuid>,
}
