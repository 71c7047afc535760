//! The sending descriptor: who a notification is delivered to.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::types::{FilmId, UserId};

/// Column-level discriminant of [`SendingTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sending_mode", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SendingMode {
    All,
    User,
    FilmSubscribers,
}

impl SendingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::User => "user",
            Self::FilmSubscribers => "film-subscribers",
        }
    }
}

impl fmt::Display for SendingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SendingMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "user" => Ok(Self::User),
            "film-subscribers" => Ok(Self::FilmSubscribers),
            _ => Err(AppError::invalid_field(
                "sendingType",
                format!("Invalid sendingType: '{s}'. Expected one of: all, user, film-subscribers"),
            )),
        }
    }
}

/// Recipient set of a notification.
///
/// Each variant carries exactly the id its mode needs, so a user target
/// without a user (or a film target without a film) cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SendingTarget {
    /// Every user account.
    All,
    /// One user.
    User { user: UserId },
    /// Every distinct subscriber of a film.
    FilmSubscribers { film: FilmId },
}

impl SendingTarget {
    pub fn mode(&self) -> SendingMode {
        match self {
            Self::All => SendingMode::All,
            Self::User { .. } => SendingMode::User,
            Self::FilmSubscribers { .. } => SendingMode::FilmSubscribers,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::User { user } => Some(*user),
            _ => None,
        }
    }

    pub fn film_id(&self) -> Option<FilmId> {
        match self {
            Self::FilmSubscribers { film } => Some(*film),
            _ => None,
        }
    }

    /// Rebuild the target from its stored columns.
    ///
    /// The table's CHECK constraints keep the columns consistent; a mismatch
    /// here means the row was written outside the application.
    pub fn from_parts(
        mode: SendingMode,
        user: Option<Uuid>,
        film: Option<Uuid>,
    ) -> Result<Self, AppError> {
        match (mode, user, film) {
            (SendingMode::All, None, None) => Ok(Self::All),
            (SendingMode::User, Some(user), None) => Ok(Self::User {
                user: UserId::from_uuid(user),
            }),
            (SendingMode::FilmSubscribers, None, Some(film)) => Ok(Self::FilmSubscribers {
                film: FilmId::from_uuid(film),
            }),
            _ => Err(AppError::internal(format!(
                "Inconsistent sending descriptor for mode '{mode}'"
            ))),
        }
    }
}

/// The three `sending_*` columns of a notification row.
///
/// Serializes as `{"sending": <SendingTarget>}` so a flattened row exposes
/// the recipient descriptor in the same shape a client submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct SendingColumns {
    #[sqlx(rename = "sending_mode")]
    pub mode: SendingMode,
    #[sqlx(rename = "sending_user_id")]
    pub user_id: Option<Uuid>,
    #[sqlx(rename = "sending_film_id")]
    pub film_id: Option<Uuid>,
}

impl SendingColumns {
    pub fn target(&self) -> Result<SendingTarget, AppError> {
        SendingTarget::from_parts(self.mode, self.user_id, self.film_id)
    }
}

impl From<SendingTarget> for SendingColumns {
    fn from(target: SendingTarget) -> Self {
        Self {
            mode: target.mode(),
            user_id: target.user_id().map(UserId::into_uuid),
            film_id: target.film_id().map(FilmId::into_uuid),
        }
    }
}

impl Serialize for SendingColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let target = self.target().map_err(serde::ser::Error::custom)?;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("sending", &target)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let user = Uuid::new_v4();
        assert_eq!(
            SendingTarget::from_parts(SendingMode::All, None, None).unwrap(),
            SendingTarget::All
        );
        let target = SendingTarget::from_parts(SendingMode::User, Some(user), None).unwrap();
        assert_eq!(target.user_id(), Some(UserId::from_uuid(user)));
        assert!(SendingTarget::from_parts(SendingMode::User, None, None).is_err());
        assert!(SendingTarget::from_parts(SendingMode::All, Some(user), None).is_err());
        assert!(SendingTarget::from_parts(SendingMode::FilmSubscribers, Some(user), None).is_err());
    }

    #[test]
    fn test_serializes_with_mode_tag() {
        let film = FilmId::new();
        let json = serde_json::to_value(SendingTarget::FilmSubscribers { film }).unwrap();
        assert_eq!(json["mode"], "film-subscribers");
        assert_eq!(json["film"], film.to_string());
        assert!(json.get("user").is_none());

        let json = serde_json::to_value(SendingTarget::All).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "all" }));
    }

    #[test]
    fn test_columns_serialize_as_sending_target() {
        let user = UserId::new();
        let columns = SendingColumns::from(SendingTarget::User { user });
        assert_eq!(columns.mode, SendingMode::User);
        assert_eq!(columns.film_id, None);

        let json = serde_json::to_value(columns).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sending": { "mode": "user", "user": user.to_string() } })
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "film-subscribers".parse::<SendingMode>().unwrap(),
            SendingMode::FilmSubscribers
        );
        let err = "everyone".parse::<SendingMode>().unwrap_err();
        assert!(err.message.contains("sendingType"));
    }
}
