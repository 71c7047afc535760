//! Film catalog management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::{FilmRepository, SubscriberRepository};
use cinedesk_entity::film::{CreateFilm, Film, FilmFilter, FilmStatus, FilmType, UpdateFilm};
use cinedesk_entity::subscriber::SubscriberView;

use crate::context::RequestContext;
use crate::slug;

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1888;
/// Latest accepted release year.
pub const MAX_RELEASE_YEAR: i32 = 2100;

/// A film as submitted for creation. The slug is derived from the title
/// when omitted.
#[derive(Debug, Clone)]
pub struct NewFilm {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub film_type: FilmType,
    pub status: Option<FilmStatus>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub poster_url: Option<String>,
    pub cover_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub genre_ids: Vec<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub actors: Vec<Uuid>,
    pub translators: Vec<Uuid>,
}

impl NewFilm {
    /// Check scalar fields and normalize title and slug.
    pub fn normalize(self) -> AppResult<CreateFilm> {
        let title = required_title(&self.title)?;
        let slug = slug::resolve(self.slug.as_deref(), &title)?;
        check_numbers(self.release_year, self.duration_minutes)?;

        Ok(CreateFilm {
            title,
            slug,
            description: self.description,
            film_type: self.film_type,
            status: self.status.unwrap_or(FilmStatus::Draft),
            release_year: self.release_year,
            duration_minutes: self.duration_minutes,
            poster_url: self.poster_url,
            cover_url: self.cover_url,
            video_url: self.video_url,
            trailer_url: self.trailer_url,
            genre_ids: dedup(self.genre_ids),
            category_ids: dedup(self.category_ids),
            actors: dedup(self.actors),
            translators: dedup(self.translators),
        })
    }
}

/// Check the scalar fields of a patch and normalize title and slug.
pub fn normalize_update(mut data: UpdateFilm) -> AppResult<UpdateFilm> {
    if let Some(title) = data.title.as_deref() {
        data.title = Some(required_title(title)?);
    }
    if let Some(raw) = data.slug.as_deref() {
        data.slug = Some(slug::resolve(Some(raw), "")?);
    }
    check_numbers(data.release_year, data.duration_minutes)?;
    data.genre_ids = data.genre_ids.map(dedup);
    data.category_ids = data.category_ids.map(dedup);
    data.actors = data.actors.map(dedup);
    data.translators = data.translators.map(dedup);
    Ok(data)
}

/// Films, their references and subscriber listings.
#[derive(Debug, Clone)]
pub struct FilmService {
    films: Arc<FilmRepository>,
    subscribers: Arc<SubscriberRepository>,
}

impl FilmService {
    /// Creates a new film service.
    pub fn new(films: Arc<FilmRepository>, subscribers: Arc<SubscriberRepository>) -> Self {
        Self { films, subscribers }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Film> {
        self.films
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Film not found"))
    }

    pub async fn list(&self, filter: &FilmFilter, page: &PageRequest) -> AppResult<PageResponse<Film>> {
        self.films.list(filter, page).await
    }

    /// Create a film. Unknown genre, category or member ids fail with a
    /// validation error naming the field.
    pub async fn create(&self, ctx: &RequestContext, input: NewFilm) -> AppResult<Film> {
        let data = input.normalize()?;
        let film = self.films.create(&data).await?;
        info!(admin_id = %ctx.user_id, film_id = %film.id, slug = %film.slug, "Film created");
        Ok(film)
    }

    pub async fn update(&self, ctx: &RequestContext, id: Uuid, data: UpdateFilm) -> AppResult<Film> {
        let data = normalize_update(data)?;
        let film = self
            .films
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Film not found"))?;
        info!(admin_id = %ctx.user_id, film_id = %id, "Film updated");
        Ok(film)
    }

    /// Delete a film. Episodes, subscriptions, reviews and comments go with it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.films.delete(id).await? {
            return Err(AppError::not_found("Film not found"));
        }
        info!(admin_id = %ctx.user_id, film_id = %id, "Film deleted");
        Ok(())
    }

    pub async fn subscribers(
        &self,
        id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SubscriberView>> {
        if !self.films.exists(id).await? {
            return Err(AppError::not_found("Film not found"));
        }
        self.subscribers.list_by_film(id, page).await
    }
}

fn required_title(raw: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::invalid_field("title", "title is required"));
    }
    Ok(title.to_string())
}

fn check_numbers(release_year: Option<i32>, duration: Option<i32>) -> AppResult<()> {
    if let Some(year) = release_year {
        if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
            return Err(AppError::invalid_field(
                "releaseYear",
                format!("releaseYear must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"),
            ));
        }
    }
    if duration.is_some_and(|d| d <= 0) {
        return Err(AppError::invalid_field(
            "durationMinutes",
            "durationMinutes must be positive",
        ));
    }
    Ok(())
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_film(title: &str) -> NewFilm {
        NewFilm {
            title: title.into(),
            slug: None,
            description: None,
            film_type: FilmType::Movie,
            status: None,
            release_year: Some(2021),
            duration_minutes: Some(148),
            poster_url: None,
            cover_url: None,
            video_url: None,
            trailer_url: None,
            genre_ids: Vec::new(),
            category_ids: Vec::new(),
            actors: Vec::new(),
            translators: Vec::new(),
        }
    }

    #[test]
    fn test_normalize_derives_slug_and_defaults_status() {
        let data = new_film("  Dune: Part One ").normalize().unwrap();
        assert_eq!(data.title, "Dune: Part One");
        assert_eq!(data.slug, "dune-part-one");
        assert_eq!(data.status, FilmStatus::Draft);
    }

    #[test]
    fn test_normalize_rejects_bad_numbers() {
        let mut film = new_film("Old");
        film.release_year = Some(1700);
        let err = film.normalize().unwrap_err();
        assert!(err.details.unwrap().get("releaseYear").is_some());

        let mut film = new_film("Short");
        film.duration_minutes = Some(0);
        assert!(film.normalize().is_err());
    }

    #[test]
    fn test_normalize_dedups_credits() {
        let actor = Uuid::new_v4();
        let mut film = new_film("Cast");
        film.actors = vec![actor, actor];
        assert_eq!(film.normalize().unwrap().actors, vec![actor]);
    }

    #[test]
    fn test_update_slug_is_normalized() {
        let data = normalize_update(UpdateFilm {
            slug: Some("New Slug".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(data.slug.as_deref(), Some("new-slug"));

        assert!(
            normalize_update(UpdateFilm {
                title: Some(" ".into()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
