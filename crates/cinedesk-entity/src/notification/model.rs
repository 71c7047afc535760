//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use cinedesk_core::types::{CommentId, EpisodeId, FilmId, ReviewId, SearchTerm, UserId};
use cinedesk_core::{AppError, AppResult};

use super::kind::{NotificationType, ReferenceField};
use super::sending::{SendingColumns, SendingMode, SendingTarget};

/// A stored notification.
///
/// The sending descriptor is kept as three columns and serialized as a
/// `sending` object; callers read it through [`Notification::sending_target`].
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub link: Option<String>,
    /// Admin who created the notification.
    pub sender_id: Option<Uuid>,
    pub film_id: Option<Uuid>,
    pub episode_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub sending: SendingColumns,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// The recipient descriptor recorded at creation time.
    pub fn sending_target(&self) -> AppResult<SendingTarget> {
        self.sending.target()
    }

    /// Typed view of the reference columns.
    pub fn refs(&self) -> NotificationRefs {
        NotificationRefs {
            film_id: self.film_id.map(FilmId::from_uuid),
            episode_id: self.episode_id.map(EpisodeId::from_uuid),
            review_id: self.review_id.map(ReviewId::from_uuid),
            comment_id: self.comment_id.map(CommentId::from_uuid),
        }
    }

    /// Copy of the editable fields.
    pub fn content(&self) -> NotificationContent {
        NotificationContent {
            title: self.title.clone(),
            message: self.message.clone(),
            notification_type: self.notification_type,
            link: self.link.clone(),
            refs: self.refs(),
        }
    }

    /// Overwrite the editable fields in place. Used by in-memory stores.
    pub fn apply(&mut self, content: &NotificationContent) {
        self.title = content.title.clone();
        self.message = content.message.clone();
        self.notification_type = content.notification_type;
        self.link = content.link.clone();
        self.film_id = content.refs.film_id.map(FilmId::into_uuid);
        self.episode_id = content.refs.episode_id.map(EpisodeId::into_uuid);
        self.review_id = content.refs.review_id.map(ReviewId::into_uuid);
        self.comment_id = content.refs.comment_id.map(CommentId::into_uuid);
        self.updated_at = Utc::now();
    }
}

/// Optional entities a notification points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationRefs {
    pub film_id: Option<FilmId>,
    pub episode_id: Option<EpisodeId>,
    pub review_id: Option<ReviewId>,
    pub comment_id: Option<CommentId>,
}

impl NotificationRefs {
    pub fn has(&self, field: ReferenceField) -> bool {
        match field {
            ReferenceField::Film => self.film_id.is_some(),
            ReferenceField::Episode => self.episode_id.is_some(),
            ReferenceField::Review => self.review_id.is_some(),
            ReferenceField::Comment => self.comment_id.is_some(),
        }
    }
}

/// The fields an admin writes and may later edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub link: Option<String>,
    pub refs: NotificationRefs,
}

impl NotificationContent {
    /// Fail with an error naming the missing field when the type's required
    /// reference is absent.
    pub fn check_references(&self) -> AppResult<()> {
        match self.notification_type.required_reference() {
            Some(field) if !self.refs.has(field) => Err(AppError::invalid_field(
                field.field_name(),
                format!(
                    "{} is required for {} notifications",
                    field.field_name(),
                    self.notification_type
                ),
            )),
            _ => Ok(()),
        }
    }
}

/// A validated notification ready to be inserted.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub content: NotificationContent,
    pub sender_id: Option<UserId>,
    pub target: SendingTarget,
}

/// Admin list filter for notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub notification_type: Option<NotificationType>,
    pub sending_mode: Option<SendingMode>,
    /// Matches title or message.
    pub search: Option<SearchTerm>,
}

impl NotificationFilter {
    /// In-memory equivalent of the SQL predicate.
    pub fn matches(&self, notification: &Notification) -> bool {
        if self
            .notification_type
            .is_some_and(|t| t != notification.notification_type)
        {
            return false;
        }
        if self
            .sending_mode
            .is_some_and(|m| m != notification.sending.mode)
        {
            return false;
        }
        if let Some(term) = &self.search {
            let needle = term.as_str().to_lowercase();
            return notification.title.to_lowercase().contains(&needle)
                || notification.message.to_lowercase().contains(&needle);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(notification_type: NotificationType, refs: NotificationRefs) -> NotificationContent {
        NotificationContent {
            title: "New episode".into(),
            message: "Episode 3 is out".into(),
            notification_type,
            link: None,
            refs,
        }
    }

    #[test]
    fn test_film_type_requires_film_id() {
        let err = content(NotificationType::Film, NotificationRefs::default())
            .check_references()
            .unwrap_err();
        assert_eq!(err.message, "filmId is required for film notifications");
        assert!(err.details.unwrap().get("filmId").is_some());

        let refs = NotificationRefs {
            film_id: Some(FilmId::new()),
            ..Default::default()
        };
        assert!(content(NotificationType::Film, refs).check_references().is_ok());
    }

    #[test]
    fn test_reply_types_require_their_reference() {
        let refs = NotificationRefs {
            film_id: Some(FilmId::new()),
            ..Default::default()
        };
        let err = content(NotificationType::ReviewReply, refs)
            .check_references()
            .unwrap_err();
        assert!(err.message.starts_with("reviewId"));
        assert!(
            content(NotificationType::System, NotificationRefs::default())
                .check_references()
                .is_ok()
        );
    }
}
