//! Member CRUD with the film-credit cascade on delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::member::MEMBER_EXISTS;
use cinedesk_database::stores::MemberStore;
use cinedesk_entity::member::{CreateMember, Member, MemberFilter, MemberRemoval, UpdateMember};

use crate::context::RequestContext;

/// Manages members, one per user account.
#[derive(Clone)]
pub struct MemberService {
    store: Arc<dyn MemberStore>,
}

impl std::fmt::Debug for MemberService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberService").finish_non_exhaustive()
    }
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Member> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))
    }

    pub async fn list(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Member>> {
        self.store.list(filter, page).await
    }

    /// Create a member for an existing user that has none yet.
    ///
    /// The pre-check gives the common case a clean error; the unique index
    /// on `user_id` still settles two concurrent requests with the same
    /// conflict.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateMember) -> AppResult<Member> {
        data.stage_name = required_name(&data.stage_name)?;

        if !self.store.user_exists(data.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        if self.store.find_by_user(data.user_id).await?.is_some() {
            return Err(AppError::conflict(MEMBER_EXISTS));
        }

        let member = self.store.create(&data).await?;
        info!(
            admin_id = %ctx.user_id,
            member_id = %member.id,
            user_id = %member.user_id,
            kind = %member.kind,
            "Member created"
        );
        Ok(member)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateMember,
    ) -> AppResult<Member> {
        if let Some(name) = data.stage_name.as_deref() {
            data.stage_name = Some(required_name(name)?);
        }
        let member = self
            .store
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;
        info!(admin_id = %ctx.user_id, member_id = %id, "Member updated");
        Ok(member)
    }

    /// Remove the member from every film's credits, then delete it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<MemberRemoval> {
        let removal = self
            .store
            .delete_and_detach(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;
        info!(
            admin_id = %ctx.user_id,
            member_id = %id,
            films_detached = removal.films_detached,
            "Member deleted"
        );
        Ok(removal)
    }
}

fn required_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid_field("stageName", "stageName is required"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryMemberStore;
    use cinedesk_core::error::ErrorKind;
    use cinedesk_core::types::UserId;
    use cinedesk_entity::member::MemberKind;
    use cinedesk_entity::user::UserRole;

    fn admin() -> RequestContext {
        RequestContext::new(UserId::new(), UserRole::Admin, "root")
    }

    fn new_member(user_id: Uuid, kind: MemberKind) -> CreateMember {
        CreateMember {
            user_id,
            kind,
            stage_name: " Lan Anh ".into(),
            bio: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_member_for_user_is_rejected() {
        let store = Arc::new(InMemoryMemberStore::new());
        let user = store.add_user().await;
        let service = MemberService::new(store.clone());

        let first = service
            .create(&admin(), new_member(user, MemberKind::Actor))
            .await
            .unwrap();
        assert_eq!(first.stage_name, "Lan Anh");

        let err = service
            .create(&admin(), new_member(user, MemberKind::Translator))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("already exists"));
        assert_eq!(store.member_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = Arc::new(InMemoryMemberStore::new());
        let err = MemberService::new(store.clone())
            .create(&admin(), new_member(Uuid::new_v4(), MemberKind::Actor))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(store.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_detaches_from_film_credits() {
        let store = Arc::new(InMemoryMemberStore::new());
        let service = MemberService::new(store.clone());
        let actor = service
            .create(&admin(), new_member(store.add_user().await, MemberKind::Actor))
            .await
            .unwrap();
        let other = service
            .create(&admin(), new_member(store.add_user().await, MemberKind::Actor))
            .await
            .unwrap();

        let film = store
            .add_film(vec![actor.id, other.id], vec![actor.id])
            .await;
        let untouched = store.add_film(vec![other.id], vec![]).await;

        let removal = service.delete(&admin(), actor.id).await.unwrap();
        assert_eq!(removal.films_detached, 1);

        let film = store.film(film).await.unwrap();
        assert_eq!(film.actors, vec![other.id]);
        assert!(film.translators.is_empty());
        assert_eq!(store.film(untouched).await.unwrap().actors, vec![other.id]);

        let err = service.get(actor.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_member() {
        let store = Arc::new(InMemoryMemberStore::new());
        let err = MemberService::new(store)
            .delete(&admin(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_blank_stage_name_rejected() {
        let store = Arc::new(InMemoryMemberStore::new());
        let user = store.add_user().await;
        let mut data = new_member(user, MemberKind::Actor);
        data.stage_name = "  ".into();
        let err = MemberService::new(store)
            .create(&admin(), data)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
