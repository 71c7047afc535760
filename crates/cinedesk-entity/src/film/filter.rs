//! Typed list filter for films.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinedesk_core::AppError;
use cinedesk_core::types::{SearchTerm, SortDirection};

use super::model::{FilmStatus, FilmType};

/// Column a film listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilmSort {
    /// Newest first by default.
    #[default]
    CreatedAt,
    /// Alphabetical.
    Title,
    /// Most watched.
    ViewCount,
    /// By release year.
    ReleaseYear,
}

impl FilmSort {
    /// Column name used in `ORDER BY`.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Title => "title",
            Self::ViewCount => "view_count",
            Self::ReleaseYear => "release_year",
        }
    }
}

impl FromStr for FilmSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            "viewCount" | "view_count" => Ok(Self::ViewCount),
            "releaseYear" | "release_year" => Ok(Self::ReleaseYear),
            _ => Err(AppError::invalid_field(
                "sort",
                format!("Cannot sort films by '{s}'"),
            )),
        }
    }
}

/// Optional predicates for the film listing. Every `Some` field narrows the
/// result set; an all-`None` filter lists everything.
#[derive(Debug, Clone, Default)]
pub struct FilmFilter {
    /// Matches title or slug.
    pub search: Option<SearchTerm>,
    /// Film must carry this genre.
    pub genre_id: Option<Uuid>,
    /// Film must carry this category.
    pub category_id: Option<Uuid>,
    /// Film must credit this member as actor or translator.
    pub member_id: Option<Uuid>,
    /// Movie or series.
    pub film_type: Option<FilmType>,
    /// Publication state.
    pub status: Option<FilmStatus>,
    /// Exact release year.
    pub release_year: Option<i32>,
    /// Ordering column.
    pub sort: FilmSort,
    /// Ordering direction.
    pub direction: SortDirection,
}

impl FilmFilter {
    /// Whether any predicate is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.genre_id.is_none()
            && self.category_id.is_none()
            && self.member_id.is_none()
            && self.film_type.is_none()
            && self.status.is_none()
            && self.release_year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse() {
        assert_eq!("viewCount".parse::<FilmSort>().unwrap(), FilmSort::ViewCount);
        assert_eq!("title".parse::<FilmSort>().unwrap().column(), "title");
        assert!("rating; DROP TABLE films".parse::<FilmSort>().is_err());
    }

    #[test]
    fn test_default_filter_is_empty() {
        assert!(FilmFilter::default().is_empty());
        let filter = FilmFilter {
            release_year: Some(1999),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
