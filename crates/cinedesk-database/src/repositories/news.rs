//! News article repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::news::{CreateNews, News, NewsFilter, UpdateNews};

use crate::error::{query_failed, write_failed};

/// Repository for news articles.
#[derive(Debug, Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

fn duplicate_slug(constraint: &str) -> Option<AppError> {
    (constraint == "news_slug_key").then(|| AppError::conflict("Slug already exists"))
}

impl NewsRepository {
    /// Create a new news repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(head: &str, filter: &NewsFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(term) = &filter.search {
            qb.push(" AND title ILIKE ").push_bind(term.ilike_pattern());
        }
        if let Some(published) = filter.is_published {
            qb.push(" AND is_published = ").push_bind(published);
        }
        qb
    }

    /// Find an article by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find news by id"))
    }

    /// List articles, newest first.
    pub async fn list(
        &self,
        filter: &NewsFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<News>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM news", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count news"))?;

        let mut select = Self::filtered("SELECT * FROM news", filter);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let articles = select
            .build_query_as::<News>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list news"))?;

        Ok(super::page_of(articles, page, total))
    }

    /// Create an article. `published_at` is stamped when created published.
    pub async fn create(&self, data: &CreateNews) -> AppResult<News> {
        sqlx::query_as::<_, News>(
            "INSERT INTO news (title, slug, summary, content, cover_url, is_published, \
                published_at, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 THEN NOW() END, $7) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.summary)
        .bind(&data.content)
        .bind(&data.cover_url)
        .bind(data.is_published)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to create news", duplicate_slug))
    }

    /// Apply a partial update. The first publication stamps `published_at`.
    pub async fn update(&self, id: Uuid, data: &UpdateNews) -> AppResult<Option<News>> {
        sqlx::query_as::<_, News>(
            "UPDATE news SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                summary = COALESCE($4, summary), \
                content = COALESCE($5, content), \
                cover_url = COALESCE($6, cover_url), \
                is_published = COALESCE($7, is_published), \
                published_at = CASE \
                    WHEN COALESCE($7, is_published) AND published_at IS NULL THEN NOW() \
                    ELSE published_at END, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.summary)
        .bind(&data.content)
        .bind(&data.cover_url)
        .bind(data.is_published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to update news", duplicate_slug))
    }

    /// Delete an article.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete news"))?;
        Ok(result.rows_affected() > 0)
    }
}
