//! Route handlers, one module per resource.

pub mod auth;
pub mod comment;
pub mod episode;
pub mod film;
pub mod health;
pub mod media;
pub mod member;
pub mod news;
pub mod notification;
pub mod plan;
pub mod review;
pub mod taxonomy;
pub mod user;
