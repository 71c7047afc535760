//! Comment repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::comment::{Comment, CommentFilter};

use crate::error::query_failed;

/// Moderation access to comments.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(head: &str, filter: &CommentFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(film) = filter.film_id {
            qb.push(" AND film_id = ").push_bind(film);
        }
        if let Some(episode) = filter.episode_id {
            qb.push(" AND episode_id = ").push_bind(episode);
        }
        if let Some(user) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user);
        }
        if let Some(hidden) = filter.is_hidden {
            qb.push(" AND is_hidden = ").push_bind(hidden);
        }
        qb
    }

    /// Find a comment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find comment by id"))
    }

    /// List comments, newest first.
    pub async fn list(
        &self,
        filter: &CommentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM comments", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count comments"))?;

        let mut select = Self::filtered("SELECT * FROM comments", filter);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let comments = select
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list comments"))?;

        Ok(super::page_of(comments, page, total))
    }

    /// Hide or reveal a comment.
    pub async fn set_hidden(&self, id: Uuid, hidden: bool) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET is_hidden = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(hidden)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("Failed to update comment visibility"))
    }

    /// Delete a comment and its replies.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete comment"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_sql() {
        let filter = CommentFilter {
            film_id: Some(Uuid::new_v4()),
            is_hidden: Some(true),
            ..Default::default()
        };
        let qb = CommentRepository::filtered("SELECT * FROM comments", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM comments WHERE TRUE AND film_id = $1 AND is_hidden = $2"
        );
    }
}
