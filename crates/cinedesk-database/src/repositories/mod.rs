//! Repository implementations for all CineDesk tables.

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

pub use comment::CommentRepository;
pub use episode::EpisodeRepository;
pub use film::FilmRepository;
pub use member::MemberRepository;
pub use news::NewsRepository;
pub use notification::NotificationRepository;
pub use plan::PlanRepository;
pub use review::ReviewRepository;
pub use subscriber::SubscriberRepository;
pub use taxonomy::TaxonomyRepository;
pub use user::UserRepository;

use cinedesk_core::types::{PageRequest, PageResponse};

/// Assemble a page from rows and a `COUNT(*)` result.
pub(crate) fn page_of<T>(items: Vec<T>, page: &PageRequest, total: i64) -> PageResponse<T> {
    PageResponse::new(items, page.page, page.page_size, total.max(0) as u64)
}
