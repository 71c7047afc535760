//! Pricing plan repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::plan::{CreatePlan, Plan, UpdatePlan};

use crate::error::{query_failed, write_failed};

/// Repository for subscription plans.
#[derive(Debug, Clone)]
pub struct PlanRepository {
    pool: PgPool,
}

fn duplicate_name(constraint: &str) -> Option<AppError> {
    (constraint == "plans_name_key").then(|| AppError::conflict("Plan name already exists"))
}

impl PlanRepository {
    /// Create a new plan repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a plan by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Plan>> {
        sqlx::query_as::<_, Plan>("SELECT * FROM plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find plan by id"))
    }

    /// List plans, cheapest first. `active` narrows by the active flag.
    pub async fn list(
        &self,
        active: Option<bool>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Plan>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM plans WHERE ($1::boolean IS NULL OR is_active = $1)",
        )
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed("Failed to count plans"))?;

        let plans = sqlx::query_as::<_, Plan>(
            "SELECT * FROM plans WHERE ($1::boolean IS NULL OR is_active = $1) \
             ORDER BY price_cents, name LIMIT $2 OFFSET $3",
        )
        .bind(active)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("Failed to list plans"))?;

        Ok(super::page_of(plans, page, total))
    }

    /// Create a plan.
    pub async fn create(&self, data: &CreatePlan) -> AppResult<Plan> {
        sqlx::query_as::<_, Plan>(
            "INSERT INTO plans (name, description, price_cents, currency, duration_days, \
                features, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price_cents)
        .bind(&data.currency)
        .bind(data.duration_days)
        .bind(&data.features)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to create plan", duplicate_name))
    }

    /// Apply a partial update. Returns `None` when the plan does not exist.
    pub async fn update(&self, id: Uuid, data: &UpdatePlan) -> AppResult<Option<Plan>> {
        sqlx::query_as::<_, Plan>(
            "UPDATE plans SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price_cents = COALESCE($4, price_cents), \
                currency = COALESCE($5, currency), \
                duration_days = COALESCE($6, duration_days), \
                features = COALESCE($7, features), \
                is_active = COALESCE($8, is_active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price_cents)
        .bind(&data.currency)
        .bind(data.duration_days)
        .bind(&data.features)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to update plan", duplicate_name))
    }

    /// Delete a plan.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete plan"))?;
        Ok(result.rows_affected() > 0)
    }
}
