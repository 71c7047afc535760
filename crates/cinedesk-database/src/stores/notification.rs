//! Notification persistence seam.

use async_trait::async_trait;
use uuid::Uuid;

use cinedesk_core::result::AppResult;
use cinedesk_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use cinedesk_entity::notification::{
    DeliveryView, Notification, NotificationContent, NotificationDraft, NotificationFilter,
    SendingTarget, UserNotification,
};

/// Notification reads and single-statement writes.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Open a transaction for a fan-out run.
    async fn begin(&self) -> AppResult<Box<dyn NotificationTx>>;

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Overwrite the editable fields. Delivery rows are left untouched.
    async fn update(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> AppResult<Option<Notification>>;

    /// Delete a notification together with its delivery rows.
    async fn delete(&self, id: NotificationId) -> AppResult<bool>;

    async fn list_deliveries(
        &self,
        id: NotificationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DeliveryView>>;

    /// Mark one delivery row read. Returns `None` when it does not exist.
    async fn mark_read(&self, delivery_id: Uuid) -> AppResult<Option<UserNotification>>;
}

/// One open fan-out transaction.
///
/// Dropping the value without calling [`NotificationTx::commit`] discards
/// every write made through it.
#[async_trait]
pub trait NotificationTx: Send {
    /// Whether the user or film named by `target` exists.
    async fn target_exists(&mut self, target: &SendingTarget) -> AppResult<bool>;

    async fn find_notification(&mut self, id: NotificationId) -> AppResult<Option<Notification>>;

    async fn insert_notification(&mut self, draft: &NotificationDraft) -> AppResult<Notification>;

    /// Next page of recipient ids in ascending order, strictly after `after`.
    async fn recipient_page(
        &mut self,
        target: &SendingTarget,
        after: Option<UserId>,
        limit: u32,
    ) -> AppResult<Vec<UserId>>;

    /// Insert delivery rows, skipping users that already have one.
    /// Returns the number of rows inserted.
    async fn insert_deliveries(
        &mut self,
        notification_id: NotificationId,
        users: &[UserId],
    ) -> AppResult<u64>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
