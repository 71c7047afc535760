//! Film repository implementation.

use std::collections::HashSet;

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::film::{
    CreateFilm, Film, FilmFilter, FilmReference, ReferenceList, UpdateFilm,
};

use crate::error::{query_failed, write_failed};

fn reference_table(reference: FilmReference) -> &'static str {
    match reference {
        FilmReference::Genre => "genres",
        FilmReference::Category => "categories",
        FilmReference::Member => "members",
    }
}

/// Share-lock every referenced row, failing with a validation error that
/// names the field when an id has no row.
///
/// Deleting a genre, category or member takes `FOR UPDATE` on its row before
/// detaching it from films, so the two writes serialize on that row: either
/// the delete sees this film's new ids, or this check no longer finds the row.
async fn lock_references(conn: &mut PgConnection, lists: &[ReferenceList<'_>]) -> AppResult<()> {
    for list in lists.iter().filter(|l| !l.ids.is_empty()) {
        let sql = format!(
            "SELECT id FROM {} WHERE id = ANY($1) ORDER BY id FOR SHARE",
            reference_table(list.target)
        );
        let found: HashSet<Uuid> = sqlx::query_scalar::<_, Uuid>(&sql)
            .bind(list.ids)
            .fetch_all(&mut *conn)
            .await
            .map_err(query_failed("Failed to lock film references"))?
            .into_iter()
            .collect();

        let missing: Vec<Uuid> = list
            .ids
            .iter()
            .filter(|id| !found.contains(id))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(list.unknown_ids(&missing));
        }
    }
    Ok(())
}

/// Repository for film CRUD and catalog queries.
#[derive(Debug, Clone)]
pub struct FilmRepository {
    pool: PgPool,
}

impl FilmRepository {
    /// Create a new film repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a film by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Film>> {
        sqlx::query_as::<_, Film>("SELECT * FROM films WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find film by id"))
    }

    /// Whether a film with this id exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM films WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to check film existence"))
    }

    fn filtered(head: &str, filter: &FilmFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(term) = &filter.search {
            let pattern = term.ilike_pattern();
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR slug ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(genre) = filter.genre_id {
            qb.push(" AND genre_ids @> ARRAY[")
                .push_bind(genre)
                .push("]::uuid[]");
        }
        if let Some(category) = filter.category_id {
            qb.push(" AND category_ids @> ARRAY[")
                .push_bind(category)
                .push("]::uuid[]");
        }
        if let Some(member) = filter.member_id {
            qb.push(" AND (actors @> ARRAY[")
                .push_bind(member)
                .push("]::uuid[] OR translators @> ARRAY[")
                .push_bind(member)
                .push("]::uuid[])");
        }
        if let Some(film_type) = filter.film_type {
            qb.push(" AND film_type = ").push_bind(film_type);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(year) = filter.release_year {
            qb.push(" AND release_year = ").push_bind(year);
        }
        qb
    }

    /// List films matching `filter`, ordered by the filter's sort column.
    pub async fn list(
        &self,
        filter: &FilmFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Film>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM films", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count films"))?;

        let mut select = Self::filtered("SELECT * FROM films", filter);
        select
            .push(format_args!(
                " ORDER BY {} {} NULLS LAST, id LIMIT ",
                filter.sort.column(),
                filter.direction.as_sql()
            ))
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let films = select
            .build_query_as::<Film>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list films"))?;

        Ok(super::page_of(films, page, total))
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(query_failed("Failed to begin transaction"))
    }

    /// Create a film after checking, under lock, that every referenced
    /// genre, category and member exists.
    pub async fn create(&self, data: &CreateFilm) -> AppResult<Film> {
        let mut tx = self.begin().await?;
        lock_references(&mut tx, &data.reference_lists()).await?;

        let film = sqlx::query_as::<_, Film>(
            "INSERT INTO films (title, slug, description, film_type, status, release_year, \
                duration_minutes, poster_url, cover_url, video_url, trailer_url, genre_ids, \
                category_ids, actors, translators) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(data.film_type)
        .bind(data.status)
        .bind(data.release_year)
        .bind(data.duration_minutes)
        .bind(&data.poster_url)
        .bind(&data.cover_url)
        .bind(&data.video_url)
        .bind(&data.trailer_url)
        .bind(&data.genre_ids)
        .bind(&data.category_ids)
        .bind(&data.actors)
        .bind(&data.translators)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            write_failed(e, "Failed to create film", |constraint| {
                (constraint == "films_slug_key")
                    .then(|| AppError::conflict(format!("Slug '{}' already exists", data.slug)))
            })
        })?;

        tx.commit()
            .await
            .map_err(query_failed("Failed to commit transaction"))?;
        Ok(film)
    }

    /// Apply a partial update. Returns `None` when the film does not exist.
    ///
    /// Reference lists present in the patch are checked under lock in the
    /// same transaction as the write.
    pub async fn update(&self, id: Uuid, data: &UpdateFilm) -> AppResult<Option<Film>> {
        let mut tx = self.begin().await?;
        lock_references(&mut tx, &data.reference_lists()).await?;

        let film = sqlx::query_as::<_, Film>(
            "UPDATE films SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                description = COALESCE($4, description), \
                film_type = COALESCE($5, film_type), \
                status = COALESCE($6, status), \
                release_year = COALESCE($7, release_year), \
                duration_minutes = COALESCE($8, duration_minutes), \
                poster_url = COALESCE($9, poster_url), \
                cover_url = COALESCE($10, cover_url), \
                video_url = COALESCE($11, video_url), \
                trailer_url = COALESCE($12, trailer_url), \
                genre_ids = COALESCE($13, genre_ids), \
                category_ids = COALESCE($14, category_ids), \
                actors = COALESCE($15, actors), \
                translators = COALESCE($16, translators), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.slug)
        .bind(&data.description)
        .bind(data.film_type)
        .bind(data.status)
        .bind(data.release_year)
        .bind(data.duration_minutes)
        .bind(&data.poster_url)
        .bind(&data.cover_url)
        .bind(&data.video_url)
        .bind(&data.trailer_url)
        .bind(&data.genre_ids)
        .bind(&data.category_ids)
        .bind(&data.actors)
        .bind(&data.translators)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            write_failed(e, "Failed to update film", |constraint| {
                (constraint == "films_slug_key").then(|| AppError::conflict("Slug already exists"))
            })
        })?;

        if film.is_some() {
            tx.commit()
                .await
                .map_err(query_failed("Failed to commit transaction"))?;
        }
        Ok(film)
    }

    /// Point the film at a new video, returning the previous URL.
    pub async fn replace_video_url(&self, id: Uuid, url: &str) -> AppResult<Option<Option<String>>> {
        sqlx::query_scalar::<_, Option<String>>(
            "UPDATE films f SET video_url = $2, updated_at = NOW() \
             FROM (SELECT id, video_url FROM films WHERE id = $1 FOR UPDATE) old \
             WHERE f.id = old.id RETURNING old.video_url",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("Failed to update film video"))
    }

    /// Delete a film. Episodes, subscriptions, reviews and comments cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete film"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::types::{SearchTerm, SortDirection};
    use cinedesk_entity::film::{FilmSort, FilmStatus};

    #[test]
    fn test_filter_sql() {
        let filter = FilmFilter {
            search: SearchTerm::parse(Some("matrix")),
            genre_id: Some(Uuid::new_v4()),
            status: Some(FilmStatus::Published),
            sort: FilmSort::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        };
        let qb = FilmRepository::filtered("SELECT * FROM films", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM films WHERE TRUE AND (title ILIKE $1 OR slug ILIKE $2) \
             AND genre_ids @> ARRAY[$3]::uuid[] AND status = $4"
        );
    }

    #[test]
    fn test_reference_tables() {
        assert_eq!(reference_table(FilmReference::Genre), "genres");
        assert_eq!(reference_table(FilmReference::Category), "categories");
        assert_eq!(reference_table(FilmReference::Member), "members");
    }

    #[test]
    fn test_member_filter_checks_both_credit_lists() {
        let filter = FilmFilter {
            member_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let qb = FilmRepository::filtered("SELECT COUNT(*) FROM films", &filter);
        assert!(qb.sql().contains("actors @> ARRAY[$1]::uuid[]"));
        assert!(qb.sql().contains("translators @> ARRAY[$2]::uuid[]"));
    }
}
