//! Review and comment moderation against PostgreSQL.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use cinedesk_entity::user::UserRole;

use crate::helpers::TestApp;

async fn add_review(app: &TestApp, film: Uuid, user: Uuid) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO reviews (film_id, user_id, rating, content) VALUES ($1, $2, 8, 'Great') \
         RETURNING id",
    )
    .bind(film)
    .bind(user)
    .fetch_one(&app.pool)
    .await
    .unwrap()
}

async fn add_comment(app: &TestApp, film: Uuid, user: Uuid, parent: Option<Uuid>) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO comments (film_id, user_id, parent_id, content) VALUES ($1, $2, $3, 'Hi') \
         RETURNING id",
    )
    .bind(film)
    .bind(user)
    .bind(parent)
    .fetch_one(&app.pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_reviews_listed_by_film_and_deleted() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let user = app.create_user("viewer", UserRole::User).await;
    let first = app.create_film("First").await;
    let second = app.create_film("Second").await;
    let review = add_review(&app, first, user).await;
    add_review(&app, second, user).await;

    let listed = app
        .request("GET", &format!("/api/reviews?filmId={first}"), None, Some(&token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["pagination"]["total"], 1);
    assert_eq!(listed.body["datas"][0]["id"], review.to_string());

    let deleted = app
        .request("DELETE", &format!("/api/reviews/{review}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/api/reviews/{review}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let listed = app
        .request("GET", &format!("/api/reviews?filmId={first}"), None, Some(&token))
        .await;
    assert_eq!(listed.body["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_comment_hide_unhide_and_delete() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let user = app.create_user("talker", UserRole::User).await;
    let film = app.create_film("Talked About").await;
    let comment = add_comment(&app, film, user, None).await;
    add_comment(&app, film, user, Some(comment)).await;

    let hidden = app
        .request(
            "PUT",
            &format!("/api/comments/{comment}/visibility"),
            Some(json!({ "hidden": true })),
            Some(&token),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::OK);
    assert_eq!(hidden.body["data"]["isHidden"], true);

    let listed = app
        .request(
            "GET",
            &format!("/api/comments?filmId={film}&hidden=true"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(listed.body["pagination"]["total"], 1);

    let shown = app
        .request(
            "PUT",
            &format!("/api/comments/{comment}/visibility"),
            Some(json!({ "hidden": false })),
            Some(&token),
        )
        .await;
    assert_eq!(shown.body["data"]["isHidden"], false);

    let deleted = app
        .request("DELETE", &format!("/api/comments/{comment}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let remaining = app
        .request("GET", &format!("/api/comments?filmId={film}"), None, Some(&token))
        .await;
    assert_eq!(remaining.body["pagination"]["total"], 0);
}
