//! Moderation of user-generated reviews and comments.

pub mod comment;
pub mod review;

pub use comment::CommentService;
pub use review::ReviewService;
