//! Member lifecycle against PostgreSQL.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use cinedesk_entity::user::UserRole;

use crate::helpers::{TestApp, data_id};

#[tokio::test]
async fn test_member_delete_strips_film_credits() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let user = app.create_user("lan", UserRole::User).await;

    let created = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": user, "kind": "actor", "stageName": "Lan" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let member = data_id(&created.body);

    let film = app.create_film("Credits").await;
    sqlx::query("UPDATE films SET actors = $2, translators = $2 WHERE id = $1")
        .bind(film)
        .bind(vec![member])
        .execute(&app.pool)
        .await
        .unwrap();

    let duplicate = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": user, "kind": "translator", "stageName": "Lan" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let deleted = app
        .request("DELETE", &format!("/api/members/{member}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["filmsDetached"], 1);

    let (actors, translators): (Vec<Uuid>, Vec<Uuid>) =
        sqlx::query_as("SELECT actors, translators FROM films WHERE id = $1")
            .bind(film)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(actors.is_empty());
    assert!(translators.is_empty());
}

#[tokio::test]
async fn test_member_for_unknown_user_is_not_found() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": Uuid::new_v4(), "kind": "actor", "stageName": "Ghost" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
