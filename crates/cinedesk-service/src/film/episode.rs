//! Episodes of series.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::{EpisodeRepository, FilmRepository};
use cinedesk_entity::episode::{CreateEpisode, Episode, UpdateEpisode};
use cinedesk_entity::film::FilmType;

use crate::context::RequestContext;

/// An episode as submitted for a given film.
#[derive(Debug, Clone)]
pub struct NewEpisode {
    pub number: i32,
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct EpisodeService {
    episodes: Arc<EpisodeRepository>,
    films: Arc<FilmRepository>,
}

impl EpisodeService {
    /// Creates a new episode service.
    pub fn new(episodes: Arc<EpisodeRepository>, films: Arc<FilmRepository>) -> Self {
        Self { episodes, films }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Episode> {
        self.episodes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Episode not found"))
    }

    pub async fn list_by_film(
        &self,
        film_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Episode>> {
        if !self.films.exists(film_id).await? {
            return Err(AppError::not_found("Film not found"));
        }
        self.episodes.list_by_film(film_id, page).await
    }

    /// Add an episode to a series.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        film_id: Uuid,
        input: NewEpisode,
    ) -> AppResult<Episode> {
        check_fields(Some(input.number), input.duration_minutes)?;

        let film = self
            .films
            .find_by_id(film_id)
            .await?
            .ok_or_else(|| AppError::not_found("Film not found"))?;
        ensure_series(film.film_type)?;

        let episode = self
            .episodes
            .create(&CreateEpisode {
                film_id,
                number: input.number,
                title: trimmed(input.title),
                video_url: input.video_url,
                duration_minutes: input.duration_minutes,
            })
            .await?;
        info!(
            admin_id = %ctx.user_id,
            film_id = %film_id,
            episode_id = %episode.id,
            number = episode.number,
            "Episode created"
        );
        Ok(episode)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateEpisode,
    ) -> AppResult<Episode> {
        check_fields(data.number, data.duration_minutes)?;
        data.title = trimmed(data.title);
        let episode = self
            .episodes
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Episode not found"))?;
        info!(admin_id = %ctx.user_id, episode_id = %id, "Episode updated");
        Ok(episode)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.episodes.delete(id).await? {
            return Err(AppError::not_found("Episode not found"));
        }
        info!(admin_id = %ctx.user_id, episode_id = %id, "Episode deleted");
        Ok(())
    }
}

fn ensure_series(film_type: FilmType) -> AppResult<()> {
    match film_type {
        FilmType::Series => Ok(()),
        FilmType::Movie => Err(AppError::invalid_field(
            "filmId",
            "Episodes can only be added to series",
        )),
    }
}

fn check_fields(number: Option<i32>, duration: Option<i32>) -> AppResult<()> {
    if number.is_some_and(|n| n < 1) {
        return Err(AppError::invalid_field("number", "number must be at least 1"));
    }
    if duration.is_some_and(|d| d <= 0) {
        return Err(AppError::invalid_field(
            "durationMinutes",
            "durationMinutes must be positive",
        ));
    }
    Ok(())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_fields() {
        assert!(check_fields(Some(1), Some(45)).is_ok());
        assert!(check_fields(None, None).is_ok());
        let err = check_fields(Some(0), None).unwrap_err();
        assert_eq!(err.message, "number must be at least 1");
        assert!(check_fields(Some(2), Some(-3)).is_err());
    }

    #[test]
    fn test_episodes_only_on_series() {
        assert!(ensure_series(FilmType::Series).is_ok());
        let err = ensure_series(FilmType::Movie).unwrap_err();
        assert_eq!(err.kind, cinedesk_core::error::ErrorKind::Validation);
        assert!(err.details.unwrap().get("filmId").is_some());
    }

    #[test]
    fn test_blank_title_dropped() {
        assert_eq!(trimmed(Some("  ".into())), None);
        assert_eq!(trimmed(Some(" Pilot ".into())).as_deref(), Some("Pilot"));
    }
}
