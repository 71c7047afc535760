//! Genres and categories.
//!
//! Both tables share one shape (`name`, `slug`, `description`), so a single
//! repository and service are written against the [`Taxonomy`] trait and
//! instantiated once per table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::postgres::PgRow;
use uuid::Uuid;

/// A row type stored in a name/slug lookup table.
pub trait Taxonomy:
    for<'r> FromRow<'r, PgRow> + Serialize + Clone + Send + Sync + Unpin + 'static
{
    /// Backing table name.
    const TABLE: &'static str;
    /// Human-readable singular name used in error messages.
    const LABEL: &'static str;
    /// Column used by `films` to reference this table.
    const FILM_COLUMN: &'static str;

    /// Row identifier.
    fn id(&self) -> Uuid;
}

/// A film genre (e.g. action, drama).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Taxonomy for Genre {
    const TABLE: &'static str = "genres";
    const LABEL: &'static str = "Genre";
    const FILM_COLUMN: &'static str = "genre_ids";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// A catalog category (e.g. cinema, anime).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Taxonomy for Category {
    const TABLE: &'static str = "categories";
    const LABEL: &'static str = "Category";
    const FILM_COLUMN: &'static str = "category_ids";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Data required to create a genre or category.
#[derive(Debug, Clone)]
pub struct TaxonomyDraft {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Partial update for a genre or category.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}
