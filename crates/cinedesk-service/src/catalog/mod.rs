//! Genres and categories.

pub mod taxonomy;

pub use taxonomy::{TaxonomyInput, TaxonomyService};
