//! Per-user delivery records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recipient's copy of a notification.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_id: Uuid,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Delivery row joined with the recipient's username, for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of one fan-out run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    /// Recipients resolved from the sending target.
    pub recipients: u64,
    /// Delivery rows actually inserted; lower than `recipients` on redelivery.
    pub inserted: u64,
    /// Number of recipient pages processed.
    pub batches: u32,
}

impl DeliveryReport {
    /// Fold one processed page into the report.
    pub fn record_batch(&mut self, recipients: usize, inserted: u64) {
        self.recipients += recipients as u64;
        self.inserted += inserted;
        self.batches += 1;
    }
}
