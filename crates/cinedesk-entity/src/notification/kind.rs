//! Notification type enum and the reference each type requires.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cinedesk_core::AppError;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    /// Platform-wide announcement.
    System,
    /// About a film; requires `filmId`.
    Film,
    /// About an episode; requires `episodeId`.
    Episode,
    /// Reply to a review; requires `reviewId`.
    ReviewReply,
    /// Reply to a comment; requires `commentId`.
    CommentReply,
    /// Direct message from an admin.
    Private,
}

/// A reference column a notification may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    Film,
    Episode,
    Review,
    Comment,
}

impl ReferenceField {
    /// Name of the field as it appears in request bodies.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Film => "filmId",
            Self::Episode => "episodeId",
            Self::Review => "reviewId",
            Self::Comment => "commentId",
        }
    }
}

impl NotificationType {
    pub const ALL: [Self; 6] = [
        Self::System,
        Self::Film,
        Self::Episode,
        Self::ReviewReply,
        Self::CommentReply,
        Self::Private,
    ];

    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Film => "film",
            Self::Episode => "episode",
            Self::ReviewReply => "review-reply",
            Self::CommentReply => "comment-reply",
            Self::Private => "private",
        }
    }

    /// The reference that must be present for this type, if any.
    pub fn required_reference(&self) -> Option<ReferenceField> {
        match self {
            Self::Film => Some(ReferenceField::Film),
            Self::Episode => Some(ReferenceField::Episode),
            Self::ReviewReply => Some(ReferenceField::Review),
            Self::CommentReply => Some(ReferenceField::Comment),
            Self::System | Self::Private => None,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_field(
                    "type",
                    format!(
                        "Invalid notification type: '{s}'. Expected one of: system, film, \
                         episode, review-reply, comment-reply, private"
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "review-reply".parse::<NotificationType>().unwrap(),
            NotificationType::ReviewReply
        );
        let err = "broadcast".parse::<NotificationType>().unwrap_err();
        assert!(err.details.unwrap().get("type").is_some());
    }

    #[test]
    fn test_required_reference() {
        assert_eq!(
            NotificationType::Film.required_reference().map(|f| f.field_name()),
            Some("filmId")
        );
        assert_eq!(
            NotificationType::CommentReply
                .required_reference()
                .map(|f| f.field_name()),
            Some("commentId")
        );
        assert!(NotificationType::System.required_reference().is_none());
        assert!(NotificationType::Private.required_reference().is_none());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&NotificationType::CommentReply).unwrap();
        assert_eq!(json, "\"comment-reply\"");
    }
}
