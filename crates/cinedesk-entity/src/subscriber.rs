//! Film subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user following a film. Source of recipients for film-subscriber
/// notifications.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Subscriber row joined with the subscribing user's public fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    /// When the user subscribed.
    pub created_at: DateTime<Utc>,
}
