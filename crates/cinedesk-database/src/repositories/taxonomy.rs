//! Repository shared by genres and categories.

use std::marker::PhantomData;

use sqlx::PgPool;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse, SearchTerm};
use cinedesk_entity::taxonomy::{Taxonomy, TaxonomyDraft, TaxonomyPatch};

use crate::error::{query_failed, write_failed};

/// CRUD over one name/slug lookup table.
#[derive(Debug)]
pub struct TaxonomyRepository<T> {
    pool: PgPool,
    _row: PhantomData<fn() -> T>,
}

impl<T> Clone for TaxonomyRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _row: PhantomData,
        }
    }
}

impl<T: Taxonomy> TaxonomyRepository<T> {
    /// Create a new repository over `T::TABLE`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _row: PhantomData,
        }
    }

    fn duplicate(constraint: &str) -> Option<AppError> {
        let table = T::TABLE;
        if constraint == format!("{table}_name_key") {
            Some(AppError::conflict(format!("{} name already exists", T::LABEL)))
        } else if constraint == format!("{table}_slug_key") {
            Some(AppError::conflict(format!("{} slug already exists", T::LABEL)))
        } else {
            None
        }
    }

    /// Find a row by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find taxonomy row"))
    }

    /// List rows alphabetically, optionally matching a name search.
    pub async fn list(
        &self,
        search: Option<&SearchTerm>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<T>> {
        let pattern = search.map(SearchTerm::ilike_pattern);
        let count_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE ($1::text IS NULL OR name ILIKE $1)",
            T::TABLE
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count taxonomy rows"))?;

        let sql = format!(
            "SELECT * FROM {} WHERE ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY name LIMIT $2 OFFSET $3",
            T::TABLE
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(&pattern)
            .bind(page.sql_limit())
            .bind(page.sql_offset())
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list taxonomy rows"))?;

        Ok(super::page_of(rows, page, total))
    }

    /// Insert a row.
    pub async fn create(&self, data: &TaxonomyDraft) -> AppResult<T> {
        let sql = format!(
            "INSERT INTO {} (name, slug, description) VALUES ($1, $2, $3) RETURNING *",
            T::TABLE
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(&data.name)
            .bind(&data.slug)
            .bind(&data.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_failed(e, "Failed to create taxonomy row", Self::duplicate))
    }

    /// Apply a partial update. Returns `None` when the row does not exist.
    pub async fn update(&self, id: Uuid, data: &TaxonomyPatch) -> AppResult<Option<T>> {
        let sql = format!(
            "UPDATE {} SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                description = COALESCE($4, description), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
            T::TABLE
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(&data.name)
            .bind(&data.slug)
            .bind(&data.description)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_failed(e, "Failed to update taxonomy row", Self::duplicate))
    }

    /// Remove the id from every film that carries it, then delete the row.
    /// Returns the number of films touched, or `None` if the row was absent.
    pub async fn delete(&self, id: Uuid) -> AppResult<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_failed("Failed to begin transaction"))?;

        // Film writes share-lock the rows they reference; this waits for them.
        let lock = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", T::TABLE);
        let exists = sqlx::query_scalar::<_, Uuid>(&lock)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_failed("Failed to lock taxonomy row"))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let column = T::FILM_COLUMN;
        let detach = format!(
            "UPDATE films SET {column} = array_remove({column}, $1), updated_at = NOW() \
             WHERE {column} @> ARRAY[$1]::uuid[]"
        );
        let detached = sqlx::query(&detach)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed("Failed to detach taxonomy row from films"))?
            .rows_affected();

        let delete = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&delete)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed("Failed to delete taxonomy row"))?;

        tx.commit()
            .await
            .map_err(query_failed("Failed to commit transaction"))?;
        Ok(Some(detached))
    }
}
