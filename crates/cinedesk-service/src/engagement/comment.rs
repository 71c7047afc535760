//! Comment moderation: list, hide or unhide, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::CommentRepository;
use cinedesk_entity::comment::{Comment, CommentFilter};

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct CommentService {
    comments: Arc<CommentRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    pub async fn list(
        &self,
        filter: &CommentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Comment>> {
        self.comments.list(filter, page).await
    }

    /// Hide a comment from viewers, or show it again.
    pub async fn set_visibility(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        hidden: bool,
    ) -> AppResult<Comment> {
        let comment = self
            .comments
            .set_hidden(id, hidden)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;
        info!(admin_id = %ctx.user_id, comment_id = %id, hidden, "Comment visibility changed");
        Ok(comment)
    }

    /// Delete a comment. Replies to it are removed by the foreign key.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.comments.delete(id).await? {
            return Err(AppError::not_found("Comment not found"));
        }
        info!(admin_id = %ctx.user_id, comment_id = %id, "Comment deleted");
        Ok(())
    }
}
