//! Member repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::member::{CreateMember, Member, MemberFilter, MemberRemoval, UpdateMember};

use crate::error::{query_failed, write_failed};
use crate::stores::MemberStore;

/// Message returned when a user already has a member entry.
pub const MEMBER_EXISTS: &str = "Member already exists for this user";

/// Postgres-backed [`MemberStore`].
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(head: &str, filter: &MemberFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(kind) = filter.kind {
            qb.push(" AND kind = ").push_bind(kind);
        }
        if let Some(term) = &filter.search {
            qb.push(" AND stage_name ILIKE ").push_bind(term.ilike_pattern());
        }
        qb
    }
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to check user existence"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find member by id"))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find member by user"))
    }

    async fn list(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Member>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM members", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count members"))?;

        let mut select = Self::filtered("SELECT * FROM members", filter);
        select
            .push(" ORDER BY stage_name, id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let members = select
            .build_query_as::<Member>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list members"))?;

        Ok(super::page_of(members, page, total))
    }

    async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "INSERT INTO members (user_id, kind, stage_name, bio, avatar_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.kind)
        .bind(&data.stage_name)
        .bind(&data.bio)
        .bind(&data.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_failed(e, "Failed to create member", |constraint| {
                (constraint == "members_user_id_key").then(|| AppError::conflict(MEMBER_EXISTS))
            })
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateMember) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "UPDATE members SET \
                kind = COALESCE($2, kind), \
                stage_name = COALESCE($3, stage_name), \
                bio = COALESCE($4, bio), \
                avatar_url = COALESCE($5, avatar_url), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.kind)
        .bind(&data.stage_name)
        .bind(&data.bio)
        .bind(&data.avatar_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("Failed to update member"))
    }

    async fn delete_and_detach(&self, id: Uuid) -> AppResult<Option<MemberRemoval>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(query_failed("Failed to begin transaction"))?;

        // Film writes share-lock the members they credit, so holding this row
        // keeps them from re-adding it between the detach and the delete.
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM members WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_failed("Failed to lock member"))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let films_detached = sqlx::query(
            "UPDATE films SET \
                actors = array_remove(actors, $1), \
                translators = array_remove(translators, $1), \
                updated_at = NOW() \
             WHERE actors @> ARRAY[$1]::uuid[] OR translators @> ARRAY[$1]::uuid[]",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(query_failed("Failed to detach member from films"))?
        .rows_affected();

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed("Failed to delete member"))?;

        tx.commit()
            .await
            .map_err(query_failed("Failed to commit transaction"))?;

        debug!(member_id = %id, films_detached, "Member removed");
        Ok(Some(MemberRemoval { films_detached }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::types::SearchTerm;
    use cinedesk_entity::member::MemberKind;

    #[test]
    fn test_filter_sql() {
        let filter = MemberFilter {
            kind: Some(MemberKind::Actor),
            search: SearchTerm::parse(Some("lan")),
        };
        let qb = MemberRepository::filtered("SELECT * FROM members", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM members WHERE TRUE AND kind = $1 AND stage_name ILIKE $2"
        );
    }
}
