//! Subscriber repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::subscriber::SubscriberView;

use crate::error::query_failed;

/// Read access to film subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriberRepository {
    pool: PgPool,
}

impl SubscriberRepository {
    /// Create a new subscriber repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a film's subscribers with their public user fields.
    pub async fn list_by_film(
        &self,
        film_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriberView>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE film_id = $1")
            .bind(film_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count subscribers"))?;

        let rows = sqlx::query_as::<_, SubscriberView>(
            "SELECT s.id, s.user_id, u.username, u.display_name, u.avatar_url, s.created_at \
             FROM subscribers s JOIN users u ON u.id = s.user_id \
             WHERE s.film_id = $1 \
             ORDER BY s.created_at DESC, s.id LIMIT $2 OFFSET $3",
        )
        .bind(film_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("Failed to list subscribers"))?;

        Ok(super::page_of(rows, page, total))
    }
}
