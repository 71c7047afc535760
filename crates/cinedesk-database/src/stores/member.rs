//! Member persistence seam.

use async_trait::async_trait;
use uuid::Uuid;

use cinedesk_core::result::AppResult;
use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_entity::member::{CreateMember, Member, MemberFilter, MemberRemoval, UpdateMember};

/// Member persistence, including the cascade into film credit lists.
#[async_trait]
pub trait MemberStore: Send + Sync + 'static {
    async fn user_exists(&self, user_id: Uuid) -> AppResult<bool>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>>;

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Member>>;

    async fn list(
        &self,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Member>>;

    /// Insert a member. A second member for the same user is a conflict.
    async fn create(&self, data: &CreateMember) -> AppResult<Member>;

    async fn update(&self, id: Uuid, data: &UpdateMember) -> AppResult<Option<Member>>;

    /// In one transaction, remove the member id from every film's `actors`
    /// and `translators`, then delete the member. `None` when absent.
    async fn delete_and_detach(&self, id: Uuid) -> AppResult<Option<MemberRemoval>>;
}
