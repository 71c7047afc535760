//! Films, their episodes and subscribers.

pub mod episode;
pub mod service;

pub use episode::{EpisodeService, NewEpisode};
pub use service::{FilmService, NewFilm};
