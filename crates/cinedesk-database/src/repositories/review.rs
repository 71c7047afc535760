//! Review repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::review::{Review, ReviewFilter};

use crate::error::query_failed;

/// Moderation access to reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(head: &str, filter: &ReviewFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(film) = filter.film_id {
            qb.push(" AND film_id = ").push_bind(film);
        }
        if let Some(user) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user);
        }
        qb
    }

    /// Find a review by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find review by id"))
    }

    /// List reviews, newest first.
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM reviews", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count reviews"))?;

        let mut select = Self::filtered("SELECT * FROM reviews", filter);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let reviews = select
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list reviews"))?;

        Ok(super::page_of(reviews, page, total))
    }

    /// Delete a review.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete review"))?;
        Ok(result.rows_affected() > 0)
    }
}
