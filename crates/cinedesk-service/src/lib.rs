//! # cinedesk-service
//!
//! Business logic for the CineDesk back-office. Each service owns the
//! validation and sequencing of one resource's actions and talks to the
//! database through repositories or store traits.
//!
//! Services follow constructor injection: every dependency is handed in at
//! construction time behind an `Arc`.

pub mod catalog;
pub mod context;
pub mod engagement;
pub mod film;
pub mod media;
pub mod member;
pub mod news;
pub mod notification;
pub mod plan;
pub mod slug;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use catalog::TaxonomyService;
pub use context::RequestContext;
pub use engagement::{CommentService, ReviewService};
pub use film::{EpisodeService, FilmService};
pub use media::MediaService;
pub use member::MemberService;
pub use news::{NewArticle, NewsService};
pub use notification::NotificationService;
pub use plan::PlanService;
pub use user::{AdminUserService, AuthService};
