//! Subscription pricing plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A purchasable subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique plan identifier.
    pub id: Uuid,
    /// Unique plan name.
    pub name: String,
    /// Marketing description.
    pub description: Option<String>,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// How long one purchase lasts.
    pub duration_days: i32,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// Whether the plan can currently be bought.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a plan.
#[derive(Debug, Clone)]
pub struct CreatePlan {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub duration_days: i32,
    pub features: Vec<String>,
    pub is_active: bool,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub currency: Option<String>,
    pub duration_days: Option<i32>,
    pub features: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
