//! Notification CRUD, fan-out and redelivery.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use cinedesk_core::config::NotificationConfig;
use cinedesk_core::types::{NotificationId, PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::stores::{NotificationStore, NotificationTx};
use cinedesk_entity::notification::{
    DeliveryReport, DeliveryView, Notification, NotificationFilter, SendingTarget,
    UserNotification,
};

use super::fanout::fan_out;
use super::input::{NotificationContentInput, NotificationInput};
use crate::context::RequestContext;

/// Creates notifications and materializes their delivery rows.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    batch_size: u32,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, config: &NotificationConfig) -> Self {
        Self {
            store,
            batch_size: config.fanout_batch_size.max(1),
        }
    }

    /// Validate `input`, insert the notification and one delivery row per
    /// resolved recipient, all in one transaction.
    ///
    /// Nothing is written when validation fails, when a `user` or
    /// `film-subscribers` target does not exist, or when any insert fails.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: NotificationInput,
    ) -> AppResult<Notification> {
        let draft = input.into_draft(Some(ctx.user_id))?;

        let mut tx = self.store.begin().await?;
        ensure_target(tx.as_mut(), &draft.target).await?;

        let notification = tx.insert_notification(&draft).await?;
        let id = NotificationId::from_uuid(notification.id);
        let report = fan_out(tx.as_mut(), id, &draft.target, self.batch_size).await?;
        tx.commit().await?;

        info!(
            admin_id = %ctx.user_id,
            notification_id = %id,
            notification_type = %notification.notification_type,
            sending_mode = %draft.target.mode(),
            recipients = report.recipients,
            batches = report.batches,
            "Notification created"
        );

        Ok(notification)
    }

    /// Re-run the fan-out from the stored sending descriptor and insert the
    /// delivery rows that are missing.
    pub async fn redeliver(&self, id: NotificationId) -> AppResult<DeliveryReport> {
        let mut tx = self.store.begin().await?;
        let notification = tx
            .find_notification(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        let target = notification.sending_target()?;
        ensure_target(tx.as_mut(), &target).await?;

        let report = fan_out(tx.as_mut(), id, &target, self.batch_size).await?;
        tx.commit().await?;

        if report.inserted > 0 {
            warn!(
                notification_id = %id,
                inserted = report.inserted,
                recipients = report.recipients,
                "Redelivery inserted missing delivery rows"
            );
        } else {
            info!(notification_id = %id, recipients = report.recipients, "Redelivery found nothing missing");
        }

        Ok(report)
    }

    pub async fn get(&self, id: NotificationId) -> AppResult<Notification> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    pub async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.list(filter, page).await
    }

    /// Replace the editable fields. Recipients are not re-resolved.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
        input: NotificationContentInput,
    ) -> AppResult<Notification> {
        let content = input.parse()?;
        let notification = self
            .store
            .update(id, &content)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        info!(admin_id = %ctx.user_id, notification_id = %id, "Notification updated");
        Ok(notification)
    }

    /// Delete a notification and its delivery rows.
    pub async fn delete(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        info!(admin_id = %ctx.user_id, notification_id = %id, "Notification deleted");
        Ok(())
    }

    /// Delivery rows of one notification with recipient usernames.
    pub async fn deliveries(
        &self,
        id: NotificationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DeliveryView>> {
        self.get(id).await?;
        self.store.list_deliveries(id, page).await
    }

    /// Mark one delivery row as read.
    pub async fn mark_read(&self, delivery_id: Uuid) -> AppResult<UserNotification> {
        self.store
            .mark_read(delivery_id)
            .await?
            .ok_or_else(|| AppError::not_found("User notification not found"))
    }
}

async fn ensure_target(tx: &mut dyn NotificationTx, target: &SendingTarget) -> AppResult<()> {
    if tx.target_exists(target).await? {
        return Ok(());
    }
    Err(match target {
        SendingTarget::User { .. } => AppError::not_found("User not found"),
        SendingTarget::FilmSubscribers { .. } => AppError::not_found("Film not found"),
        SendingTarget::All => AppError::internal("Sending target could not be resolved"),
    })
}
