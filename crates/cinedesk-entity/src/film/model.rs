//! Film entity model.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use cinedesk_core::AppError;

/// Single feature or episodic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "film_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilmType {
    /// One video.
    Movie,
    /// Split into episodes.
    Series,
}

impl FromStr for FilmType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            _ => Err(AppError::invalid_field(
                "type",
                format!("Invalid film type: '{s}'. Expected one of: movie, series"),
            )),
        }
    }
}

/// Publication state of a film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "film_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilmStatus {
    /// Not visible to viewers.
    Draft,
    /// Visible to viewers.
    Published,
    /// Previously published, now withdrawn.
    Hidden,
}

impl FromStr for FilmStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "hidden" => Ok(Self::Hidden),
            _ => Err(AppError::invalid_field(
                "status",
                format!("Invalid film status: '{s}'. Expected one of: draft, published, hidden"),
            )),
        }
    }
}

/// A film or series in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Unique film identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    /// Synopsis.
    pub description: Option<String>,
    /// Movie or series.
    pub film_type: FilmType,
    /// Publication state.
    pub status: FilmStatus,
    /// Year of first release.
    pub release_year: Option<i32>,
    /// Runtime in minutes.
    pub duration_minutes: Option<i32>,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Wide cover image URL.
    pub cover_url: Option<String>,
    /// Main video URL (movies).
    pub video_url: Option<String>,
    /// Trailer URL.
    pub trailer_url: Option<String>,
    /// Genre ids.
    pub genre_ids: Vec<Uuid>,
    /// Category ids.
    pub category_ids: Vec<Uuid>,
    /// Member ids credited as actors.
    pub actors: Vec<Uuid>,
    /// Member ids credited as translators.
    pub translators: Vec<Uuid>,
    /// Total views.
    pub view_count: i64,
    /// When the film was created.
    pub created_at: DateTime<Utc>,
    /// When the film was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Film {
    /// Whether the member is credited as actor or translator.
    pub fn credits(&self, member_id: Uuid) -> bool {
        self.actors.contains(&member_id) || self.translators.contains(&member_id)
    }
}

/// Data required to create a film.
#[derive(Debug, Clone)]
pub struct CreateFilm {
    /// Title.
    pub title: String,
    /// Slug, already normalized.
    pub slug: String,
    /// Synopsis.
    pub description: Option<String>,
    /// Movie or series.
    pub film_type: FilmType,
    /// Publication state.
    pub status: FilmStatus,
    /// Release year.
    pub release_year: Option<i32>,
    /// Runtime.
    pub duration_minutes: Option<i32>,
    /// Poster URL.
    pub poster_url: Option<String>,
    /// Cover URL.
    pub cover_url: Option<String>,
    /// Video URL.
    pub video_url: Option<String>,
    /// Trailer URL.
    pub trailer_url: Option<String>,
    /// Genre ids.
    pub genre_ids: Vec<Uuid>,
    /// Category ids.
    pub category_ids: Vec<Uuid>,
    /// Actor member ids.
    pub actors: Vec<Uuid>,
    /// Translator member ids.
    pub translators: Vec<Uuid>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateFilm {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub film_type: Option<FilmType>,
    pub status: Option<FilmStatus>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub cover_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub genre_ids: Option<Vec<Uuid>>,
    pub category_ids: Option<Vec<Uuid>>,
    pub actors: Option<Vec<Uuid>>,
    pub translators: Option<Vec<Uuid>>,
}

impl UpdateFilm {
    /// Id lists present in the patch.
    pub fn reference_lists(&self) -> Vec<ReferenceList<'_>> {
        [
            (FilmReference::Genre, "genreIds", &self.genre_ids),
            (FilmReference::Category, "categoryIds", &self.category_ids),
            (FilmReference::Member, "actors", &self.actors),
            (FilmReference::Member, "translators", &self.translators),
        ]
        .into_iter()
        .filter_map(|(target, field, ids)| {
            ids.as_deref().map(|ids| ReferenceList { target, field, ids })
        })
        .collect()
    }
}

impl CreateFilm {
    pub fn reference_lists(&self) -> Vec<ReferenceList<'_>> {
        vec![
            ReferenceList::new(FilmReference::Genre, "genreIds", &self.genre_ids),
            ReferenceList::new(FilmReference::Category, "categoryIds", &self.category_ids),
            ReferenceList::new(FilmReference::Member, "actors", &self.actors),
            ReferenceList::new(FilmReference::Member, "translators", &self.translators),
        ]
    }
}

/// Tables a film holds id references into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmReference {
    Genre,
    Category,
    Member,
}

/// One id list of a film together with the request field it came from.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceList<'a> {
    pub target: FilmReference,
    pub field: &'static str,
    pub ids: &'a [Uuid],
}

impl<'a> ReferenceList<'a> {
    pub fn new(target: FilmReference, field: &'static str, ids: &'a [Uuid]) -> Self {
        Self { target, field, ids }
    }

    /// Validation error naming this field and the ids with no row.
    pub fn unknown_ids(&self, missing: &[Uuid]) -> AppError {
        let ids = missing
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        AppError::invalid_field(
            self.field,
            format!("{} contains unknown ids: {ids}", self.field),
        )
    }
}
