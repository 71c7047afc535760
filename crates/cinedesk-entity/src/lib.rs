//! # cinedesk-entity
//!
//! Domain entity models for the CineDesk back-office. Every struct in this
//! crate represents a database table row, the input to create or patch one,
//! or a typed list filter. Row structs derive `sqlx::FromRow` and serialize
//! with camelCase keys for the HTTP layer.

pub mod comment;
pub mod episode;
pub mod film;
pub mod member;
pub mod news;
pub mod notification;
pub mod plan;
pub mod review;
pub mod subscriber;
pub mod taxonomy;
pub mod user;
