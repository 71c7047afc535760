//! Notification fan-out against PostgreSQL.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use cinedesk_entity::user::UserRole;

use crate::helpers::{TestApp, data_id};

#[tokio::test]
async fn test_broadcast_reaches_every_account() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    for i in 0..4 {
        app.create_user(&format!("viewer{i}"), UserRole::User).await;
    }

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "title": "Maintenance",
                "message": "Streaming pauses at midnight",
                "type": "system",
                "sendingType": "all",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    // Four viewers plus the admin, inserted in pages of two.
    assert_eq!(app.delivery_count(data_id(&response.body)).await, 5);
}

#[tokio::test]
async fn test_film_subscribers_and_redelivery() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let film = app.create_film("Night Train").await;
    let fan = app.create_user("fan", UserRole::User).await;
    app.create_user("bystander", UserRole::User).await;
    app.subscribe(fan, film).await;

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "title": "New episode",
                "message": "Episode 2 is out",
                "type": "film",
                "filmId": film,
                "sendingType": "film-subscribers",
                "sendingFilmId": film,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let id = data_id(&response.body);
    assert_eq!(app.delivery_count(id).await, 1);

    let late = app.create_user("late-fan", UserRole::User).await;
    app.subscribe(late, film).await;

    let redelivered = app
        .request(
            "POST",
            &format!("/api/notifications/{id}/redeliver"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(redelivered.status, StatusCode::OK);
    assert_eq!(redelivered.body["data"]["recipients"], 2);
    assert_eq!(redelivered.body["data"]["inserted"], 1);
    assert_eq!(app.delivery_count(id).await, 2);
}

#[tokio::test]
async fn test_missing_recipient_writes_nothing() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "title": "Hello",
                "message": "Direct",
                "type": "private",
                "sendingType": "user",
                "sendingUserId": Uuid::new_v4(),
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_delete_cascades_to_deliveries() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let viewer = app.create_user("viewer", UserRole::User).await;

    let created = app
        .request(
            "POST",
            "/api/notifications",
            Some(json!({
                "title": "Just for you",
                "message": "Hi",
                "type": "private",
                "sendingType": "user",
                "sendingUserId": viewer,
            })),
            Some(&token),
        )
        .await;
    let id = data_id(&created.body);
    assert_eq!(app.delivery_count(id).await, 1);

    let deleted = app
        .request("DELETE", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.delivery_count(id).await, 0);
}
