//! Newtype wrappers around [`uuid::Uuid`] for domain identifiers.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `FilmId` is expected. When the `sqlx` feature is enabled, each ID type
//! also implements `sqlx::Type`, `sqlx::Encode`, and `sqlx::Decode` for
//! PostgreSQL.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        #[cfg(feature = "sqlx")]
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as sqlx::Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user account.
    UserId
);

define_id!(
    /// Unique identifier for a film.
    FilmId
);

define_id!(
    /// Unique identifier for an episode of a series.
    EpisodeId
);

define_id!(
    /// Unique identifier for a review.
    ReviewId
);

define_id!(
    /// Unique identifier for a comment.
    CommentId
);

define_id!(
    /// Unique identifier for a notification.
    NotificationId
);

/// Parse a raw identifier supplied for `field`.
///
/// An absent value is reported as "`field` is required"; a malformed one as
/// "`field` must be a valid identifier". Both errors carry the field name in
/// their details so callers can highlight the offending input.
pub fn parse_required_id<I: FromStr>(field: &str, raw: Option<&str>) -> AppResult<I> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Err(AppError::invalid_field(field, format!("{field} is required"))),
        Some(value) => parse_id(field, value),
    }
}

/// Parse an identifier that is known to be present.
pub fn parse_id<I: FromStr>(field: &str, raw: &str) -> AppResult<I> {
    raw.trim().parse::<I>().map_err(|_| {
        AppError::invalid_field(field, format!("{field} must be a valid identifier"))
    })
}

/// Parse an identifier that may be omitted.
pub fn parse_optional_id<I: FromStr>(field: &str, raw: Option<&str>) -> AppResult<Option<I>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse_id(field, value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_user_id_new() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_film_id_display() {
        let uuid = Uuid::new_v4();
        let id = FilmId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = NotificationId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id.0));
    }

    #[test]
    fn test_parse_required_id_missing() {
        let err = parse_required_id::<FilmId>("filmId", None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "filmId is required");

        let err = parse_required_id::<FilmId>("filmId", Some("   ")).unwrap_err();
        assert_eq!(err.message, "filmId is required");
    }

    #[test]
    fn test_parse_required_id_malformed() {
        let err = parse_required_id::<UserId>("sendingUserId", Some("not-a-uuid")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("sendingUserId"));
    }

    #[test]
    fn test_parse_optional_id() {
        let uuid = Uuid::new_v4();
        let parsed: Option<EpisodeId> =
            parse_optional_id("episodeId", Some(&uuid.to_string())).expect("valid");
        assert_eq!(parsed, Some(EpisodeId(uuid)));
        let absent: Option<EpisodeId> = parse_optional_id("episodeId", None).expect("absent");
        assert!(absent.is_none());
        assert!(parse_optional_id::<EpisodeId>("episodeId", Some("x")).is_err());
    }
}
