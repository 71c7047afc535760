//! In-memory implementations of the store traits.
//!
//! Each transaction works on a private copy of the state and publishes it
//! on commit, so a dropped transaction leaves nothing behind, the same as a
//! rolled-back database transaction.

mod member;
mod notification;

pub use member::InMemoryMemberStore;
pub use notification::InMemoryNotificationStore;

use cinedesk_core::types::{PageRequest, PageResponse};

fn paginate<T: Clone>(items: &[T], page: &PageRequest) -> PageResponse<T> {
    let slice = items
        .iter()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(page.limit() as usize)
        .cloned()
        .collect();
    PageResponse::new(slice, page.page, page.page_size, items.len() as u64)
}
