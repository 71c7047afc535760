//! Member (actor/translator) entities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::types::SearchTerm;

/// What a member contributes to films.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// Appears in a film's `actors` list.
    Actor,
    /// Appears in a film's `translators` list.
    Translator,
}

impl MemberKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Translator => "translator",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "actor" => Ok(Self::Actor),
            "translator" => Ok(Self::Translator),
            _ => Err(AppError::invalid_field(
                "kind",
                format!("Invalid member kind: '{s}'. Expected one of: actor, translator"),
            )),
        }
    }
}

/// A staff entry tied to exactly one user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique member identifier.
    pub id: Uuid,
    /// Owning user account (unique).
    pub user_id: Uuid,
    /// Actor or translator.
    pub kind: MemberKind,
    /// Name shown in film credits.
    pub stage_name: String,
    /// Short biography.
    pub bio: Option<String>,
    /// Portrait URL.
    pub avatar_url: Option<String>,
    /// When the member was created.
    pub created_at: DateTime<Utc>,
    /// When the member was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a member.
#[derive(Debug, Clone)]
pub struct CreateMember {
    /// Owning user account.
    pub user_id: Uuid,
    /// Actor or translator.
    pub kind: MemberKind,
    /// Credit name.
    pub stage_name: String,
    /// Biography.
    pub bio: Option<String>,
    /// Portrait URL.
    pub avatar_url: Option<String>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    /// New kind.
    pub kind: Option<MemberKind>,
    /// New credit name.
    pub stage_name: Option<String>,
    /// New biography.
    pub bio: Option<String>,
    /// New portrait URL.
    pub avatar_url: Option<String>,
}

/// List filter for members.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Restrict to one kind.
    pub kind: Option<MemberKind>,
    /// Matches the stage name.
    pub search: Option<SearchTerm>,
}

impl MemberFilter {
    /// In-memory equivalent of the SQL predicate.
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(kind) = self.kind {
            if member.kind != kind {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let needle = term.as_str().to_lowercase();
            if !member.stage_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Outcome of removing a member together with its film credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRemoval {
    /// Number of films whose actor or translator list was rewritten.
    pub films_detached: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(kind: MemberKind, name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            stage_name: name.to_string(),
            bio: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Actor".parse::<MemberKind>().unwrap(), MemberKind::Actor);
        assert!("director".parse::<MemberKind>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let filter = MemberFilter {
            kind: Some(MemberKind::Translator),
            search: SearchTerm::parse(Some("lan")),
        };
        assert!(filter.matches(&member(MemberKind::Translator, "Lan Anh")));
        assert!(!filter.matches(&member(MemberKind::Actor, "Lan Anh")));
        assert!(!filter.matches(&member(MemberKind::Translator, "Minh")));
        assert!(MemberFilter::default().matches(&member(MemberKind::Actor, "x")));
    }
}
