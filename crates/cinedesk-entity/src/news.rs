//! News articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use cinedesk_core::types::SearchTerm;

/// A news article shown on the platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: Uuid,
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub cover_url: Option<String>,
    pub is_published: bool,
    /// Set the first time the article is published.
    pub published_at: Option<DateTime<Utc>>,
    /// Admin who wrote the article; cleared if that user is deleted.
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an article.
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub cover_url: Option<String>,
    pub is_published: bool,
    pub author_id: Option<Uuid>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Admin list filter for articles.
#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    pub search: Option<SearchTerm>,
    pub is_published: Option<bool>,
}
