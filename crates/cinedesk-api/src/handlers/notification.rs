//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinedesk_core::types::NotificationId;
use cinedesk_entity::notification::{
    DeliveryReport, DeliveryView, Notification, UserNotification,
};

use crate::dto::ApiResponse;
use crate::dto::query::NotificationQuery;
use crate::dto::request::{CreateNotificationRequest, NotificationContentRequest};
use crate::error::ApiResult;
use crate::extractors::{AdminUser, PaginationParams, QueryParams, ValidatedJson, parse_path_id};
use crate::state::AppState;

fn notification_id(raw: &str) -> ApiResult<NotificationId> {
    Ok(NotificationId::from_uuid(parse_path_id(raw)?))
}

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(page): QueryParams<PaginationParams>,
    QueryParams(query): QueryParams<NotificationQuery>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let filter = query.into_filter()?;
    let result = state
        .notification_service
        .list(&filter, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/notifications
///
/// Stores the notification and one delivery per recipient in a single
/// transaction.
pub async fn create(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Notification>>)> {
    let notification = state
        .notification_service
        .create(&admin, req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(notification).with_message("Notification sent")),
    ))
}

/// GET /api/notifications/{id}
pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = state.notification_service.get(notification_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PUT /api/notifications/{id}
///
/// Edits the content only; recipients stay as they were.
pub async fn update(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<NotificationContentRequest>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = state
        .notification_service
        .update(&admin, notification_id(&id)?, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state
        .notification_service
        .delete(&admin, notification_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::message("Notification deleted")))
}

/// GET /api/notifications/{id}/deliveries
pub async fn deliveries(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    QueryParams(page): QueryParams<PaginationParams>,
) -> ApiResult<Json<ApiResponse<DeliveryView>>> {
    let result = state
        .notification_service
        .deliveries(notification_id(&id)?, &page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::page(result)))
}

/// POST /api/notifications/{id}/redeliver
pub async fn redeliver(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<DeliveryReport>>> {
    let id = notification_id(&id)?;
    let report = state.notification_service.redeliver(id).await?;
    tracing::info!(
        admin_id = %admin.user_id,
        notification_id = %id,
        inserted = report.inserted,
        "Notification redelivered"
    );
    Ok(Json(ApiResponse::ok(report)))
}

/// PUT /api/user-notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserNotification>>> {
    let delivery = state
        .notification_service
        .mark_read(parse_path_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(delivery)))
}
