//! Episode entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One episode of a series.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Unique episode identifier.
    pub id: Uuid,
    /// Parent film.
    pub film_id: Uuid,
    /// Position within the film, unique per film.
    pub number: i32,
    /// Optional episode title.
    pub title: Option<String>,
    /// Video URL.
    pub video_url: Option<String>,
    /// Runtime in minutes.
    pub duration_minutes: Option<i32>,
    /// When the episode was created.
    pub created_at: DateTime<Utc>,
    /// When the episode was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an episode.
#[derive(Debug, Clone)]
pub struct CreateEpisode {
    pub film_id: Uuid,
    pub number: i32,
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateEpisode {
    pub number: Option<i32>,
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}
