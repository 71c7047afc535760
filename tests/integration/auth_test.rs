//! Back-office sign-in.

use axum::http::StatusCode;
use serde_json::json;

use cinedesk_entity::user::UserRole;

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_admin_login_and_refresh() {
    let Some(app) = TestApp::new().await else { return };
    app.create_user("director", UserRole::Admin).await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "director", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["data"]["user"]["username"], "director");
    assert!(login.body["data"]["user"].get("passwordHash").is_none());

    let refresh_token = login.body["data"]["refreshToken"].as_str().unwrap();
    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert!(refreshed.body["data"]["accessToken"].is_string());
}

#[tokio::test]
async fn test_viewer_cannot_sign_in() {
    let Some(app) = TestApp::new().await else { return };
    app.create_user("viewer", UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "viewer", "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_wrong_password_matches_unknown_user() {
    let Some(app) = TestApp::new().await else { return };
    app.create_user("director", UserRole::Admin).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "director", "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": TEST_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["error"], unknown.body["error"]);
}
