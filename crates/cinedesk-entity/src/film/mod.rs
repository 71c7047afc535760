//! Film domain entities.

pub mod filter;
pub mod model;

pub use filter::{FilmFilter, FilmSort};
pub use model::{
    CreateFilm, Film, FilmReference, FilmStatus, FilmType, ReferenceList, UpdateFilm,
};
