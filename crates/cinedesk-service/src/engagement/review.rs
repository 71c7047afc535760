//! Review moderation: list and delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::ReviewRepository;
use cinedesk_entity::review::{Review, ReviewFilter};

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct ReviewService {
    reviews: Arc<ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))
    }

    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Review>> {
        self.reviews.list(filter, page).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.reviews.delete(id).await? {
            return Err(AppError::not_found("Review not found"));
        }
        info!(admin_id = %ctx.user_id, review_id = %id, "Review deleted");
        Ok(())
    }
}
