//! News articles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::NewsRepository;
use cinedesk_entity::news::{CreateNews, News, NewsFilter, UpdateNews};

use crate::context::RequestContext;
use crate::slug;

/// An article as submitted. The slug defaults to one derived from the title.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content: String,
    pub cover_url: Option<String>,
    pub is_published: bool,
}

#[derive(Debug, Clone)]
pub struct NewsService {
    news: Arc<NewsRepository>,
}

impl NewsService {
    pub fn new(news: Arc<NewsRepository>) -> Self {
        Self { news }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<News> {
        self.news
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("News article not found"))
    }

    pub async fn list(&self, filter: &NewsFilter, page: &PageRequest) -> AppResult<PageResponse<News>> {
        self.news.list(filter, page).await
    }

    /// Create an article authored by the acting admin.
    pub async fn create(&self, ctx: &RequestContext, input: NewArticle) -> AppResult<News> {
        let title = required("title", &input.title)?;
        let data = CreateNews {
            slug: slug::resolve(input.slug.as_deref(), &title)?,
            title,
            summary: input.summary,
            content: required("content", &input.content)?,
            cover_url: input.cover_url,
            is_published: input.is_published,
            author_id: Some(ctx.user_id.into_uuid()),
        };

        let article = self.news.create(&data).await?;
        info!(
            admin_id = %ctx.user_id,
            news_id = %article.id,
            published = article.is_published,
            "News article created"
        );
        Ok(article)
    }

    pub async fn update(&self, ctx: &RequestContext, id: Uuid, mut data: UpdateNews) -> AppResult<News> {
        if let Some(title) = data.title.as_deref() {
            data.title = Some(required("title", title)?);
        }
        if let Some(content) = data.content.as_deref() {
            data.content = Some(required("content", content)?);
        }
        if let Some(raw) = data.slug.as_deref() {
            data.slug = Some(slug::resolve(Some(raw), "")?);
        }

        let article = self
            .news
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("News article not found"))?;
        info!(admin_id = %ctx.user_id, news_id = %id, "News article updated");
        Ok(article)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.news.delete(id).await? {
            return Err(AppError::not_found("News article not found"));
        }
        info!(admin_id = %ctx.user_id, news_id = %id, "News article deleted");
        Ok(())
    }
}

fn required(field: &str, raw: &str) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::invalid_field(field, format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Ra mắt  ").unwrap(), "Ra mắt");

        let err = required("content", " \n ").unwrap_err();
        assert_eq!(err.kind, cinedesk_core::error::ErrorKind::Validation);
        assert!(err.details.unwrap().get("content").is_some());
    }
}
