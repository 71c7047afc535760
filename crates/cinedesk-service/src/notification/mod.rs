//! Notification authoring and recipient fan-out.

pub mod fanout;
pub mod input;
pub mod service;

pub use input::{NotificationContentInput, NotificationInput};
pub use service::NotificationService;
