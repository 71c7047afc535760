//! One service for both genres and categories.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cinedesk_core::types::{PageRequest, PageResponse, SearchTerm};
use cinedesk_core::{AppError, AppResult};
use cinedesk_database::repositories::TaxonomyRepository;
use cinedesk_entity::taxonomy::{Taxonomy, TaxonomyDraft, TaxonomyPatch};

use crate::context::RequestContext;
use crate::slug;

/// Name, slug and description as submitted.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl TaxonomyInput {
    /// Validate for creation: a name is required, the slug defaults to it.
    pub fn into_draft(self) -> AppResult<TaxonomyDraft> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::invalid_field("name", "name is required"))?
            .to_string();
        let slug = slug::resolve(self.slug.as_deref(), &name)?;
        Ok(TaxonomyDraft {
            name,
            slug,
            description: self.description,
        })
    }

    /// Validate for a partial update.
    pub fn into_patch(self) -> AppResult<TaxonomyPatch> {
        let name = match self.name.as_deref().map(str::trim) {
            Some("") => return Err(AppError::invalid_field("name", "name must not be blank")),
            other => other.map(str::to_string),
        };
        let slug = match self.slug.as_deref() {
            Some(raw) => Some(slug::resolve(Some(raw), "")?),
            None => None,
        };
        Ok(TaxonomyPatch {
            name,
            slug,
            description: self.description,
        })
    }
}

/// CRUD over a [`Taxonomy`] table.
pub struct TaxonomyService<T: Taxonomy> {
    repo: Arc<TaxonomyRepository<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Taxonomy> Clone for TaxonomyService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Taxonomy> std::fmt::Debug for TaxonomyService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyService")
            .field("table", &T::TABLE)
            .finish()
    }
}

impl<T: Taxonomy> TaxonomyService<T> {
    pub fn new(repo: Arc<TaxonomyRepository<T>>) -> Self {
        Self {
            repo,
            _marker: PhantomData,
        }
    }

    fn not_found() -> AppError {
        AppError::not_found(format!("{} not found", T::LABEL))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<T> {
        self.repo.find_by_id(id).await?.ok_or_else(Self::not_found)
    }

    pub async fn list(
        &self,
        search: Option<&SearchTerm>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<T>> {
        self.repo.list(search, page).await
    }

    pub async fn create(&self, ctx: &RequestContext, input: TaxonomyInput) -> AppResult<T> {
        let draft = input.into_draft()?;
        let row = self.repo.create(&draft).await?;
        info!(admin_id = %ctx.user_id, id = %row.id(), slug = %draft.slug, "{} created", T::LABEL);
        Ok(row)
    }

    pub async fn update(&self, ctx: &RequestContext, id: Uuid, input: TaxonomyInput) -> AppResult<T> {
        let patch = input.into_patch()?;
        let row = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(Self::not_found)?;
        info!(admin_id = %ctx.user_id, id = %id, "{} updated", T::LABEL);
        Ok(row)
    }

    /// Delete the row and drop its id from every film that carries it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<u64> {
        let films_detached = self.repo.delete(id).await?.ok_or_else(Self::not_found)?;
        info!(
            admin_id = %ctx.user_id,
            id = %id,
            films_detached,
            "{} deleted",
            T::LABEL
        );
        Ok(films_detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_name_and_derives_slug() {
        let draft = TaxonomyInput {
            name: Some(" Khoa Học Viễn Tưởng ".into()),
            ..Default::default()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.name, "Khoa Học Viễn Tưởng");
        assert_eq!(draft.slug, "khoa-hoc-vien-tuong");

        let err = TaxonomyInput::default().into_draft().unwrap_err();
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_patch_rejects_blank_name() {
        assert!(
            TaxonomyInput {
                name: Some("   ".into()),
                ..Default::default()
            }
            .into_patch()
            .is_err()
        );
        let patch = TaxonomyInput {
            slug: Some("Sci Fi".into()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.slug.as_deref(), Some("sci-fi"));
        assert!(patch.name.is_none());
    }
}
