//! Raw notification input and its validation.
//!
//! Everything here runs before the first database write: a request that
//! fails any check never opens a transaction.

use serde::Deserialize;

use cinedesk_core::types::{
    CommentId, EpisodeId, FilmId, ReviewId, UserId, parse_optional_id, parse_required_id,
};
use cinedesk_core::{AppError, AppResult};
use cinedesk_entity::notification::{
    NotificationContent, NotificationDraft, NotificationRefs, NotificationType, SendingMode,
    SendingTarget,
};

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Editable notification fields as submitted by an admin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContentInput {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub link: Option<String>,
    pub film_id: Option<String>,
    pub episode_id: Option<String>,
    pub review_id: Option<String>,
    pub comment_id: Option<String>,
}

impl NotificationContentInput {
    /// Validate text fields, the type and the reference ids.
    ///
    /// A reference that is present must be a valid id even when the type
    /// does not need it; the one the type needs must be present.
    pub fn parse(&self) -> AppResult<NotificationContent> {
        let title = required_text("title", &self.title)?;
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::invalid_field(
                "title",
                format!("title must be at most {MAX_TITLE_LEN} characters"),
            ));
        }
        let message = required_text("message", &self.message)?;

        let notification_type: NotificationType = match non_blank(self.notification_type.as_deref())
        {
            Some(raw) => raw.parse()?,
            None => return Err(AppError::invalid_field("type", "type is required")),
        };

        let refs = NotificationRefs {
            film_id: parse_optional_id::<FilmId>("filmId", self.film_id.as_deref())?,
            episode_id: parse_optional_id::<EpisodeId>("episodeId", self.episode_id.as_deref())?,
            review_id: parse_optional_id::<ReviewId>("reviewId", self.review_id.as_deref())?,
            comment_id: parse_optional_id::<CommentId>("commentId", self.comment_id.as_deref())?,
        };

        let content = NotificationContent {
            title,
            message,
            notification_type,
            link: non_blank(self.link.as_deref()).map(str::to_string),
            refs,
        };
        content.check_references()?;
        Ok(content)
    }
}

/// A new notification plus its sending descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    #[serde(flatten)]
    pub content: NotificationContentInput,
    pub sending_type: Option<String>,
    pub sending_user_id: Option<String>,
    pub sending_film_id: Option<String>,
}

impl NotificationInput {
    /// Resolve the sending descriptor. Only the id the mode needs is read.
    pub fn target(&self) -> AppResult<SendingTarget> {
        let mode: SendingMode = match non_blank(self.sending_type.as_deref()) {
            Some(raw) => raw.parse()?,
            None => {
                return Err(AppError::invalid_field(
                    "sendingType",
                    "sendingType is required",
                ));
            }
        };

        Ok(match mode {
            SendingMode::All => SendingTarget::All,
            SendingMode::User => SendingTarget::User {
                user: parse_required_id::<UserId>("sendingUserId", self.sending_user_id.as_deref())?,
            },
            SendingMode::FilmSubscribers => SendingTarget::FilmSubscribers {
                film: parse_required_id::<FilmId>("sendingFilmId", self.sending_film_id.as_deref())?,
            },
        })
    }

    /// Validate the whole input into a draft ready for insertion.
    pub fn into_draft(self, sender_id: Option<UserId>) -> AppResult<NotificationDraft> {
        let content = self.content.parse()?;
        let target = self.target()?;
        Ok(NotificationDraft {
            content,
            sender_id,
            target,
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn required_text(field: &str, raw: &str) -> AppResult<String> {
    match non_blank(Some(raw)) {
        Some(value) => Ok(value.to_string()),
        None => Err(AppError::invalid_field(field, format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::error::ErrorKind;
    use uuid::Uuid;

    fn input(kind: &str, sending: &str) -> NotificationInput {
        NotificationInput {
            content: NotificationContentInput {
                title: "Season 2".into(),
                message: "Now streaming".into(),
                notification_type: Some(kind.into()),
                ..Default::default()
            },
            sending_type: Some(sending.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_system_to_all() {
        let draft = input("system", "all").into_draft(None).unwrap();
        assert_eq!(draft.target, SendingTarget::All);
        assert_eq!(draft.content.notification_type, NotificationType::System);
    }

    #[test]
    fn test_film_type_without_film_id() {
        let err = input("film", "all").into_draft(None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("filmId"));
    }

    #[test]
    fn test_film_type_with_malformed_film_id() {
        let mut raw = input("film", "all");
        raw.content.film_id = Some("film-42".into());
        let err = raw.into_draft(None).unwrap_err();
        assert_eq!(err.message, "filmId must be a valid identifier");
    }

    #[test]
    fn test_user_mode_requires_valid_user_id() {
        let err = input("private", "user").into_draft(None).unwrap_err();
        assert_eq!(err.message, "sendingUserId is required");

        let mut raw = input("private", "user");
        raw.sending_user_id = Some("12345".into());
        let err = raw.into_draft(None).unwrap_err();
        assert_eq!(err.message, "sendingUserId must be a valid identifier");

        let mut raw = input("private", "user");
        let user = Uuid::new_v4();
        raw.sending_user_id = Some(user.to_string());
        let draft = raw.into_draft(None).unwrap();
        assert_eq!(draft.target.user_id(), Some(UserId::from_uuid(user)));
    }

    #[test]
    fn test_unknown_sending_type() {
        let err = input("system", "everyone").into_draft(None).unwrap_err();
        assert!(err.details.unwrap().get("sendingType").is_some());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut raw = input("system", "all");
        raw.content.title = "   ".into();
        assert_eq!(raw.into_draft(None).unwrap_err().message, "title is required");
    }

    #[test]
    fn test_deserializes_camel_case_body() {
        let film = Uuid::new_v4();
        let body = serde_json::json!({
            "title": "New film",
            "message": "Watch it",
            "type": "film",
            "filmId": film.to_string(),
            "sendingType": "film-subscribers",
            "sendingFilmId": film.to_string(),
        });
        let raw: NotificationInput = serde_json::from_value(body).unwrap();
        let draft = raw.into_draft(None).unwrap();
        assert_eq!(draft.target.film_id(), Some(FilmId::from_uuid(film)));
        assert_eq!(draft.content.refs.film_id, Some(FilmId::from_uuid(film)));
    }
}
