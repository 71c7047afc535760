//! Store traits for the workflows that need more than one statement.
//!
//! The notification fan-out and the member cascade run inside a database
//! transaction. Services are written against these traits so the same
//! workflow runs on Postgres in production and on in-memory stores in tests.

pub mod member;
pub mod notification;

pub use member::MemberStore;
pub use notification::{NotificationStore, NotificationTx};
