//! Genre and category handlers.
//!
//! Both tables share one set of handlers, instantiated per type in the
//! router (`taxonomy::list::<Genre>`).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use cinedesk_entity::taxonomy::{Category, Genre, Taxonomy};
use cinedesk_service::TaxonomyService;

use crate::dto::ApiResponse;
use crate::dto::query::SearchQuery;
use crate::dto::request::TaxonomyRequest;
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

/// A taxonomy exposed over HTTP: picks its service out of the state.
pub trait TaxonomyResource: Taxonomy {
    fn service(state: &AppState) -> &TaxonomyService<Self>;
}

impl TaxonomyResource for Genre {
    fn service(state: &AppState) -> &TaxonomyService<Self> {
        &state.genre_service
    }
}

impl TaxonomyResource for Category {
    fn service(state: &AppState) -> &TaxonomyService<Self> {
        &state.category_service
    }
}

/// Response to a delete: how many films lost the reference.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detached {
    pub films_detached: u64,
}

/// GET /api/genres, GET /api/categories
pub async fn list<T: TaxonomyResource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> ApiResult<Json<ApiResponse<T>>> {
    let result = T::service(&state)
        .list(query.term().as_ref(), &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/genres, POST /api/categories
pub async fn create<T: TaxonomyResource>(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<TaxonomyRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<T>>)> {
    let item = T::service(&state).create(&admin, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// GET /api/genres/{id}, GET /api/categories/{id}
pub async fn get<T: TaxonomyResource>(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<T>>> {
    let item = T::service(&state).get(parse_path_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// PUT /api/genres/{id}, PUT /api/categories/{id}
pub async fn update<T: TaxonomyResource>(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<TaxonomyRequest>,
) -> ApiResult<Json<ApiResponse<T>>> {
    let item = T::service(&state)
        .update(&admin, parse_path_id(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/genres/{id}, DELETE /api/categories/{id}
pub async fn delete<T: TaxonomyResource>(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Detached>>> {
    let films_detached = T::service(&state)
        .delete(&admin, parse_path_id(&id)?)
        .await?;
    Ok(Json(
        ApiResponse::ok(Detached { films_detached })
            .with_message(format!("{} deleted", T::LABEL)),
    ))
}
