//! Access control and envelope shape shared by every admin route.

mod common;

use axum::http::StatusCode;
use cinedesk_entity::user::UserRole;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/notifications", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Missing Authorization header");
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = common::TestApp::new().await;

    let response = app
        .request("GET", "/api/members", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_viewer_token_is_forbidden() {
    let app = common::TestApp::new().await;
    let token = app.token(UserRole::User);

    let response = app
        .request("GET", "/api/notifications", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "Admin access required");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_path_id_names_the_field() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .request("GET", "/api/notifications/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"]["id"][0], "id must be a valid identifier");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = common::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unavailable");
    assert_eq!(response.body["database"], false);
    assert_eq!(response.body["storage"], true);
}
