//! User comments on films and episodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment, optionally replying to another comment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub film_id: Uuid,
    /// Set when the comment was left on a specific episode.
    pub episode_id: Option<Uuid>,
    pub user_id: Uuid,
    /// Set for replies.
    pub parent_id: Option<Uuid>,
    pub content: String,
    /// Hidden comments stay in the table but are not shown to viewers.
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin list filter for comments.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub film_id: Option<Uuid>,
    pub episode_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub is_hidden: Option<bool>,
}
