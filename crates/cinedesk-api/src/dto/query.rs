//! Query-string filters for list endpoints.
//!
//! Ids and enum values arrive as strings and are parsed here so that a bad
//! value is reported as a 422 naming the query parameter.

use serde::Deserialize;
use uuid::Uuid;

use cinedesk_core::AppResult;
use cinedesk_core::types::{SearchTerm, SortDirection, parse_optional_id};
use cinedesk_entity::comment::CommentFilter;
use cinedesk_entity::film::FilmFilter;
use cinedesk_entity::member::MemberFilter;
use cinedesk_entity::news::NewsFilter;
use cinedesk_entity::notification::NotificationFilter;
use cinedesk_entity::review::ReviewFilter;
use cinedesk_entity::user::UserFilter;

/// `?type&sendingType&search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub sending_type: Option<String>,
    pub search: Option<String>,
}

impl NotificationQuery {
    pub fn into_filter(self) -> AppResult<NotificationFilter> {
        Ok(NotificationFilter {
            notification_type: non_empty(&self.notification_type)
                .map(str::parse)
                .transpose()?,
            sending_mode: non_empty(&self.sending_type).map(str::parse).transpose()?,
            search: SearchTerm::parse(self.search.as_deref()),
        })
    }
}

/// `?kind&search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberQuery {
    pub kind: Option<String>,
    pub search: Option<String>,
}

impl MemberQuery {
    pub fn into_filter(self) -> AppResult<MemberFilter> {
        Ok(MemberFilter {
            kind: non_empty(&self.kind).map(str::parse).transpose()?,
            search: SearchTerm::parse(self.search.as_deref()),
        })
    }
}

/// Film listing filters and ordering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmQuery {
    pub search: Option<String>,
    pub genre_id: Option<String>,
    pub category_id: Option<String>,
    pub member_id: Option<String>,
    #[serde(rename = "type")]
    pub film_type: Option<String>,
    pub status: Option<String>,
    pub release_year: Option<i32>,
    pub sort: Option<String>,
    pub order: Option<SortDirection>,
}

impl FilmQuery {
    pub fn into_filter(self) -> AppResult<FilmFilter> {
        Ok(FilmFilter {
            search: SearchTerm::parse(self.search.as_deref()),
            genre_id: optional_id("genreId", &self.genre_id)?,
            category_id: optional_id("categoryId", &self.category_id)?,
            member_id: optional_id("memberId", &self.member_id)?,
            film_type: non_empty(&self.film_type).map(str::parse).transpose()?,
            status: non_empty(&self.status).map(str::parse).transpose()?,
            release_year: self.release_year,
            sort: non_empty(&self.sort)
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            direction: self.order.unwrap_or_default(),
        })
    }
}

/// `?filmId&userId`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub film_id: Option<String>,
    pub user_id: Option<String>,
}

impl ReviewQuery {
    pub fn into_filter(self) -> AppResult<ReviewFilter> {
        Ok(ReviewFilter {
            film_id: optional_id("filmId", &self.film_id)?,
            user_id: optional_id("userId", &self.user_id)?,
        })
    }
}

/// `?filmId&episodeId&userId&hidden`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    pub film_id: Option<String>,
    pub episode_id: Option<String>,
    pub user_id: Option<String>,
    pub hidden: Option<bool>,
}

impl CommentQuery {
    pub fn into_filter(self) -> AppResult<CommentFilter> {
        Ok(CommentFilter {
            film_id: optional_id("filmId", &self.film_id)?,
            episode_id: optional_id("episodeId", &self.episode_id)?,
            user_id: optional_id("userId", &self.user_id)?,
            is_hidden: self.hidden,
        })
    }
}

/// `?active`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanQuery {
    pub active: Option<bool>,
}

/// `?search&published`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub search: Option<String>,
    pub published: Option<bool>,
}

impl NewsQuery {
    pub fn into_filter(self) -> NewsFilter {
        NewsFilter {
            search: SearchTerm::parse(self.search.as_deref()),
            is_published: self.published,
        }
    }
}

/// `?search&role&active`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl UserQuery {
    pub fn into_filter(self) -> AppResult<UserFilter> {
        Ok(UserFilter {
            search: SearchTerm::parse(self.search.as_deref()),
            role: non_empty(&self.role).map(str::parse).transpose()?,
            is_active: self.active,
        })
    }
}

/// `?search` for genres and categories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> Option<SearchTerm> {
        SearchTerm::parse(self.search.as_deref())
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn optional_id(field: &str, raw: &Option<String>) -> AppResult<Option<Uuid>> {
    parse_optional_id(field, non_empty(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::error::ErrorKind;
    use cinedesk_entity::film::FilmSort;
    use cinedesk_entity::notification::NotificationType;

    #[test]
    fn test_blank_parameters_are_ignored() {
        let filter = NotificationQuery {
            notification_type: Some(" ".into()),
            sending_type: None,
            search: Some("".into()),
        }
        .into_filter()
        .unwrap();
        assert!(filter.notification_type.is_none());
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_notification_type_parsed() {
        let filter = NotificationQuery {
            notification_type: Some("film".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.notification_type, Some(NotificationType::Film));
    }

    #[test]
    fn test_bad_id_names_parameter() {
        let err = FilmQuery {
            genre_id: Some("nope".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.details.unwrap().get("genreId").is_some());
    }

    #[test]
    fn test_film_sort_defaults() {
        let filter = FilmQuery {
            sort: Some("title".into()),
            order: Some(SortDirection::Asc),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.sort, FilmSort::Title);
        assert_eq!(filter.direction, SortDirection::Asc);
        assert_eq!(FilmQuery::default().into_filter().unwrap().sort, FilmSort::CreatedAt);
    }
}
