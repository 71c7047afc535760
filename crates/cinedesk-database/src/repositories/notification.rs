//! Notification repository and its fan-out transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use cinedesk_entity::notification::{
    DeliveryView, Notification, NotificationContent, NotificationDraft, NotificationFilter,
    SendingTarget, UserNotification,
};

use crate::error::{query_failed, write_failed};
use crate::stores::{NotificationStore, NotificationTx};

/// Name the request field behind a violated reference constraint.
fn missing_reference(constraint: &str) -> Option<AppError> {
    let (field, label) = match constraint {
        "notifications_film_id_fkey" => ("filmId", "Film"),
        "notifications_episode_id_fkey" => ("episodeId", "Episode"),
        "notifications_review_id_fkey" => ("reviewId", "Review"),
        "notifications_comment_id_fkey" => ("commentId", "Comment"),
        _ => return None,
    };
    Some(AppError::invalid_field(field, format!("{label} not found")))
}

/// Postgres-backed [`NotificationStore`].
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn filtered(head: &str, filter: &NotificationFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE TRUE");
        if let Some(kind) = filter.notification_type {
            qb.push(" AND notification_type = ").push_bind(kind);
        }
        if let Some(mode) = filter.sending_mode {
            qb.push(" AND sending_mode = ").push_bind(mode);
        }
        if let Some(term) = &filter.search {
            let pattern = term.ilike_pattern();
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR message ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn begin(&self) -> AppResult<Box<dyn NotificationTx>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(query_failed("Failed to begin transaction"))?;
        Ok(Box::new(PgNotificationTx { tx }))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find notification by id"))
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let mut count = Self::filtered("SELECT COUNT(*) FROM notifications", filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed("Failed to count notifications"))?;

        let mut select = Self::filtered("SELECT * FROM notifications", filter);
        select
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(page.sql_limit())
            .push(" OFFSET ")
            .push_bind(page.sql_offset());
        let notifications = select
            .build_query_as::<Notification>()
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list notifications"))?;

        Ok(super::page_of(notifications, page, total))
    }

    async fn update(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET \
                title = $2, message = $3, notification_type = $4, link = $5, \
                film_id = $6, episode_id = $7, review_id = $8, comment_id = $9, \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.notification_type)
        .bind(&content.link)
        .bind(content.refs.film_id)
        .bind(content.refs.episode_id)
        .bind(content.refs.review_id)
        .bind(content.refs.comment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_failed(e, "Failed to update notification", missing_reference))
    }

    async fn delete(&self, id: NotificationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to delete notification"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_deliveries(
        &self,
        id: NotificationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DeliveryView>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_notifications WHERE notification_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(query_failed("Failed to count deliveries"))?;

        let rows = sqlx::query_as::<_, DeliveryView>(
            "SELECT un.id, un.user_id, u.username, un.is_read, un.read_at, un.created_at \
             FROM user_notifications un JOIN users u ON u.id = un.user_id \
             WHERE un.notification_id = $1 \
             ORDER BY u.username, un.id LIMIT $2 OFFSET $3",
        )
        .bind(id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed("Failed to list deliveries"))?;

        Ok(super::page_of(rows, page, total))
    }

    async fn mark_read(&self, delivery_id: Uuid) -> AppResult<Option<UserNotification>> {
        sqlx::query_as::<_, UserNotification>(
            "UPDATE user_notifications \
             SET is_read = TRUE, read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 RETURNING *",
        )
        .bind(delivery_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed("Failed to mark delivery read"))
    }
}

/// Fan-out transaction on a pooled connection.
pub struct PgNotificationTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl NotificationTx for PgNotificationTx {
    async fn target_exists(&mut self, target: &SendingTarget) -> AppResult<bool> {
        let (sql, id) = match target {
            SendingTarget::All => return Ok(true),
            SendingTarget::User { user } => {
                ("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)", user.into_uuid())
            }
            SendingTarget::FilmSubscribers { film } => {
                ("SELECT EXISTS(SELECT 1 FROM films WHERE id = $1)", film.into_uuid())
            }
        };
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(query_failed("Failed to check sending target"))
    }

    async fn find_notification(&mut self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(query_failed("Failed to load notification"))
    }

    async fn insert_notification(&mut self, draft: &NotificationDraft) -> AppResult<Notification> {
        let content = &draft.content;
        let target = &draft.target;
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (title, message, notification_type, link, sender_id, \
                film_id, episode_id, review_id, comment_id, \
                sending_mode, sending_user_id, sending_film_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(&content.title)
        .bind(&content.message)
        .bind(content.notification_type)
        .bind(&content.link)
        .bind(draft.sender_id)
        .bind(content.refs.film_id)
        .bind(content.refs.episode_id)
        .bind(content.refs.review_id)
        .bind(content.refs.comment_id)
        .bind(target.mode())
        .bind(target.user_id())
        .bind(target.film_id())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| write_failed(e, "Failed to create notification", missing_reference))
    }

    async fn recipient_page(
        &mut self,
        target: &SendingTarget,
        after: Option<UserId>,
        limit: u32,
    ) -> AppResult<Vec<UserId>> {
        let query = match target {
            SendingTarget::All => sqlx::query_scalar::<_, UserId>(
                "SELECT id FROM users WHERE ($1::uuid IS NULL OR id > $1) ORDER BY id LIMIT $2",
            )
            .bind(after)
            .bind(i64::from(limit)),
            SendingTarget::User { user } => sqlx::query_scalar::<_, UserId>(
                "SELECT id FROM users WHERE id = $3 AND ($1::uuid IS NULL OR id > $1) \
                 ORDER BY id LIMIT $2",
            )
            .bind(after)
            .bind(i64::from(limit))
            .bind(*user),
            SendingTarget::FilmSubscribers { film } => sqlx::query_scalar::<_, UserId>(
                "SELECT DISTINCT user_id FROM subscribers \
                 WHERE film_id = $3 AND ($1::uuid IS NULL OR user_id > $1) \
                 ORDER BY user_id LIMIT $2",
            )
            .bind(after)
            .bind(i64::from(limit))
            .bind(*film),
        };
        query
            .fetch_all(&mut *self.tx)
            .await
            .map_err(query_failed("Failed to resolve recipients"))
    }

    async fn insert_deliveries(
        &mut self,
        notification_id: NotificationId,
        users: &[UserId],
    ) -> AppResult<u64> {
        if users.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = users.iter().map(|u| u.into_uuid()).collect();
        let result = sqlx::query(
            "INSERT INTO user_notifications (user_id, notification_id) \
             SELECT UNNEST($1::uuid[]), $2 \
             ON CONFLICT (user_id, notification_id) DO NOTHING",
        )
        .bind(&ids)
        .bind(notification_id)
        .execute(&mut *self.tx)
        .await
        .map_err(query_failed("Failed to insert deliveries"))?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx
            .commit()
            .await
            .map_err(query_failed("Failed to commit notification"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_entity::notification::{NotificationType, SendingMode};

    #[test]
    fn test_missing_reference_names_field() {
        let err = missing_reference("notifications_episode_id_fkey").unwrap();
        assert_eq!(err.message, "Episode not found");
        assert!(err.details.unwrap().get("episodeId").is_some());
        assert!(missing_reference("notifications_sender_id_fkey").is_none());
    }

    #[test]
    fn test_filter_sql() {
        let filter = NotificationFilter {
            notification_type: Some(NotificationType::Film),
            sending_mode: Some(SendingMode::FilmSubscribers),
            search: None,
        };
        let qb = NotificationRepository::filtered("SELECT * FROM notifications", &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM notifications WHERE TRUE AND notification_type = $1 \
             AND sending_mode = $2"
        );
    }
}
