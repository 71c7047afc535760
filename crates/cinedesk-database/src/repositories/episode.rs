//! Episode repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::episode::{CreateEpisode, Episode, UpdateEpisode};

use crate::error::{query_failed, write_failed};

/// Repository for the episodes of a series.
#[derive(Debug, Clone)]
pub struct EpisodeRepository {
    pool: PgPool,
}

fn duplicate_number(constraint: &str) -> Option<AppError> {
    (constraint == "episodes_film_id_number_key")
        .then(|| AppError::conflict("Episode number already exists for this film"))
}

impl EpisodeRepository {
    /// Create a new episode repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an episode by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Episode>> {
        sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find episode by id"))
    }

    /// List a film's episodes in order.
    pub async fn list_by_film(
        &self,
        film_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Episode>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM episodes WHERE film_id = $1")
            .bind(film_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count episodes"))?;

        let episodes = sqlx::query_as::<_, Episode>(
            "SELECT * FROM episodes WHERE film_id = $1 ORDER BY number LIMIT $2 OFFSET $3",
        )
        .bind(film_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("Failed to list episodes"))?;

        Ok(super::page_of(episodes, page, total))
    }

    /// Create an episode.
    pub async fn create(&self, data: &CreateEpisode) -> AppResult<Episode> {
        sqlx::query_as::<_, Episode>(
            "INSERT INTO episodes (film_id, number, title, video_url, duration_minutes) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.film_id)
        .bind(data.number)
        .bind(&data.title)
        .bind(&data.video_url)
        .bind(data.duration_minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to create episode", duplicate_number))
    }

    /// Apply a partial update. Returns `None` when the episode does not exist.
    pub async fn update(&self, id: Uuid, data: &UpdateEpisode) -> AppResult<Option<Episode>> {
        sqlx::query_as::<_, Episode>(
            "UPDATE episodes SET \
                number = COALESCE($2, number), \
                title = COALESCE($3, title), \
                video_url = COALESCE($4, video_url), \
                duration_minutes = COALESCE($5, duration_minutes), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.number)
        .bind(&data.title)
        .bind(&data.video_url)
        .bind(data.duration_minutes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to update episode", duplicate_number))
    }

    /// Point the episode at a new video, returning the previous URL.
    pub async fn replace_video_url(&self, id: Uuid, url: &str) -> AppResult<Option<Option<String>>> {
        sqlx::query_scalar::<_, Option<String>>(
            "UPDATE episodes e SET video_url = $2, updated_at = NOW() \
             FROM (SELECT id, video_url FROM episodes WHERE id = $1 FOR UPDATE) old \
             WHERE e.id = old.id RETURNING old.video_url",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("Failed to update episode video"))
    }

    /// Delete an episode.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete episode"))?;
        Ok(result.rows_affected() > 0)
    }
}
