use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use cinedesk_core::types::{FilmId, NotificationId, PageRequest, PageResponse, UserId};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::stores::{NotificationStore, NotificationTx};
use cinedesk_entity::notification::{
    DeliveryView, Notification, NotificationContent, NotificationDraft, NotificationFilter,
    SendingTarget, UserNotification,
};

use super::paginate;

#[derive(Debug, Clone, Default)]
struct State {
    users: BTreeMap<Uuid, String>,
    films: HashSet<Uuid>,
    subscribers: Vec<(Uuid, Uuid)>,
    notifications: Vec<Notification>,
    deliveries: Vec<UserNotification>,
    fail_delivery_inserts: bool,
    transactions: u32,
}

/// Notification store backed by vectors behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `count` users and return their ids.
    pub async fn add_users(&self, count: usize) -> Vec<Uuid> {
        let mut state = self.state.lock().await;
        (0..count)
            .map(|_| {
                let id = Uuid::new_v4();
                state.users.insert(id, format!("user-{}", &id.simple().to_string()[..8]));
                id
            })
            .collect()
    }

    pub async fn add_film(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().await.films.insert(id);
        id
    }

    /// Record a subscription. Duplicates are kept so fan-out must dedupe.
    pub async fn subscribe(&self, user: Uuid, film: Uuid) {
        self.state.lock().await.subscribers.push((user, film));
    }

    /// Make every delivery insert fail until switched off.
    pub async fn fail_delivery_inserts(&self, fail: bool) {
        self.state.lock().await.fail_delivery_inserts = fail;
    }

    pub async fn notification_count(&self) -> usize {
        self.state.lock().await.notifications.len()
    }

    pub async fn delivery_count(&self, id: NotificationId) -> usize {
        self.state
            .lock()
            .await
            .deliveries
            .iter()
            .filter(|d| d.notification_id == id.into_uuid())
            .count()
    }

    pub async fn transactions_opened(&self) -> u32 {
        self.state.lock().await.transactions
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn begin(&self) -> AppResult<Box<dyn NotificationTx>> {
        let mut state = self.state.lock().await;
        state.transactions += 1;
        Ok(Box::new(InMemoryNotificationTx {
            shared: self.state.clone(),
            staged: state.clone(),
        }))
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let state = self.state.lock().await;
        Ok(state
            .notifications
            .iter()
            .find(|n| n.id == id.into_uuid())
            .cloned())
    }

    async fn list(
        &self,
        filter: &NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let state = self.state.lock().await;
        let mut matching: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&matching, page))
    }

    async fn update(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.lock().await;
        Ok(state
            .notifications
            .iter_mut()
            .find(|n| n.id == id.into_uuid())
            .map(|n| {
                n.apply(content);
                n.clone()
            }))
    }

    async fn delete(&self, id: NotificationId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id.into_uuid());
        state.deliveries.retain(|d| d.notification_id != id.into_uuid());
        Ok(state.notifications.len() < before)
    }

    async fn list_deliveries(
        &self,
        id: NotificationId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DeliveryView>> {
        let state = self.state.lock().await;
        let views: Vec<DeliveryView> = state
            .deliveries
            .iter()
            .filter(|d| d.notification_id == id.into_uuid())
            .map(|d| DeliveryView {
                id: d.id,
                user_id: d.user_id,
                username: state.users.get(&d.user_id).cloned().unwrap_or_default(),
                is_read: d.is_read,
                read_at: d.read_at,
                created_at: d.created_at,
            })
            .collect();
        Ok(paginate(&views, page))
    }

    async fn mark_read(&self, delivery_id: Uuid) -> AppResult<Option<UserNotification>> {
        let mut state = self.state.lock().await;
        Ok(state
            .deliveries
            .iter_mut()
            .find(|d| d.id == delivery_id)
            .map(|d| {
                d.is_read = true;
                d.read_at.get_or_insert_with(Utc::now);
                d.clone()
            }))
    }
}

struct InMemoryNotificationTx {
    shared: Arc<Mutex<State>>,
    staged: State,
}

#[async_trait]
impl NotificationTx for InMemoryNotificationTx {
    async fn target_exists(&mut self, target: &SendingTarget) -> AppResult<bool> {
        Ok(match target {
            SendingTarget::All => true,
            SendingTarget::User { user } => self.staged.users.contains_key(user.as_uuid()),
            SendingTarget::FilmSubscribers { film } => self.staged.films.contains(film.as_uuid()),
        })
    }

    async fn find_notification(&mut self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self
            .staged
            .notifications
            .iter()
            .find(|n| n.id == id.into_uuid())
            .cloned())
    }

    async fn insert_notification(&mut self, draft: &NotificationDraft) -> AppResult<Notification> {
        let now = Utc::now();
        let content = &draft.content;
        let notification = Notification {
            id: Uuid::new_v4(),
            title: content.title.clone(),
            message: content.message.clone(),
            notification_type: content.notification_type,
            link: content.link.clone(),
            sender_id: draft.sender_id.map(UserId::into_uuid),
            film_id: content.refs.film_id.map(FilmId::into_uuid),
            episode_id: content.refs.episode_id.map(Into::into),
            review_id: content.refs.review_id.map(Into::into),
            comment_id: content.refs.comment_id.map(Into::into),
            sending: draft.target.into(),
            created_at: now,
            updated_at: now,
        };
        self.staged.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn recipient_page(
        &mut self,
        target: &SendingTarget,
        after: Option<UserId>,
        limit: u32,
    ) -> AppResult<Vec<UserId>> {
        let candidates: BTreeSet<Uuid> = match target {
            SendingTarget::All => self.staged.users.keys().copied().collect(),
            SendingTarget::User { user } => self
                .staged
                .users
                .keys()
                .filter(|id| *id == user.as_uuid())
                .copied()
                .collect(),
            SendingTarget::FilmSubscribers { film } => self
                .staged
                .subscribers
                .iter()
                .filter(|(_, f)| f == film.as_uuid())
                .map(|(u, _)| *u)
                .collect(),
        };
        Ok(candidates
            .into_iter()
            .filter(|id| after.is_none_or(|a| *id > a.into_uuid()))
            .take(limit as usize)
            .map(UserId::from_uuid)
            .collect())
    }

    async fn insert_deliveries(
        &mut self,
        notification_id: NotificationId,
        users: &[UserId],
    ) -> AppResult<u64> {
        if self.staged.fail_delivery_inserts {
            return Err(AppError::database("Simulated delivery insert failure"));
        }
        let mut inserted = 0;
        for user in users {
            let exists = self.staged.deliveries.iter().any(|d| {
                d.notification_id == notification_id.into_uuid() && d.user_id == user.into_uuid()
            });
            if !exists {
                self.staged.deliveries.push(UserNotification {
                    id: Uuid::new_v4(),
                    user_id: user.into_uuid(),
                    notification_id: notification_id.into_uuid(),
                    is_read: false,
                    read_at: None,
                    created_at: Utc::now(),
                });
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut shared = self.shared.lock().await;
        let transactions = shared.transactions;
        *shared = self.staged;
        shared.transactions = transactions;
        Ok(())
    }
}
