//! Notification domain entities.

pub mod delivery;
pub mod kind;
pub mod model;
pub mod sending;

pub use delivery::{DeliveryReport, DeliveryView, UserNotification};
pub use kind::{NotificationType, ReferenceField};
pub use model::{
    Notification, NotificationContent, NotificationDraft, NotificationFilter, NotificationRefs,
};
pub use sending::{SendingColumns, SendingMode, SendingTarget};
