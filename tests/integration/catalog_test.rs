//! Films, episodes and taxonomy against PostgreSQL.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use cinedesk_entity::user::UserRole;

use crate::helpers::{TestApp, data_id};

async fn film_ids(app: &TestApp, film: Uuid) -> (Vec<Uuid>, Vec<Uuid>) {
    sqlx::query_as("SELECT genre_ids, category_ids FROM films WHERE id = $1")
        .bind(film)
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_taxonomy_delete_detaches_from_films() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;

    let drama = app
        .request("POST", "/api/genres", Some(json!({ "name": "Drama" })), Some(&token))
        .await;
    assert_eq!(drama.status, StatusCode::CREATED, "{}", drama.body);
    let drama = data_id(&drama.body);
    let comedy = data_id(
        &app.request("POST", "/api/genres", Some(json!({ "name": "Comedy" })), Some(&token))
            .await
            .body,
    );
    let korean = data_id(
        &app.request("POST", "/api/categories", Some(json!({ "name": "Korean" })), Some(&token))
            .await
            .body,
    );

    let film = app
        .request(
            "POST",
            "/api/films",
            Some(json!({
                "title": "Reply 1988",
                "type": "series",
                "genreIds": [drama, comedy],
                "categoryIds": [korean],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(film.status, StatusCode::CREATED, "{}", film.body);
    let film = data_id(&film.body);

    let deleted = app
        .request("DELETE", &format!("/api/genres/{drama}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["filmsDetached"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/categories/{korean}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["filmsDetached"], 1);

    let (genres, categories) = film_ids(&app, film).await;
    assert_eq!(genres, vec![comedy]);
    assert!(categories.is_empty());

    let again = app
        .request("DELETE", &format!("/api/genres/{drama}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_film_write_rejects_removed_references() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;
    let user = app.create_user("minh", UserRole::User).await;

    let member = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": user, "kind": "actor", "stageName": "Minh" })),
            Some(&token),
        )
        .await;
    let member = data_id(&member.body);
    let film = app.create_film("Ensemble").await;

    let removed = app
        .request("DELETE", &format!("/api/members/{member}"), None, Some(&token))
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let update = app
        .request(
            "PUT",
            &format!("/api/films/{film}"),
            Some(json!({ "actors": [member] })),
            Some(&token),
        )
        .await;
    assert_eq!(update.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(update.body["details"]["actors"].is_array());

    let actors: Vec<Uuid> = sqlx::query_scalar("SELECT actors FROM films WHERE id = $1")
        .bind(film)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(actors.is_empty());

    let create = app
        .request(
            "POST",
            "/api/films",
            Some(json!({ "title": "Orphan", "type": "movie", "genreIds": [Uuid::new_v4()] })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(create.body["details"]["genreIds"].is_array());
}

#[tokio::test]
async fn test_episodes_only_on_series() {
    let Some(app) = TestApp::new().await else { return };
    let token = app.admin_token().await;

    let movie = app.create_film("Standalone").await;
    let rejected = app
        .request(
            "POST",
            &format!("/api/films/{movie}/episodes"),
            Some(json!({ "number": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.body["details"]["filmId"].is_array());

    let series = app
        .request(
            "POST",
            "/api/films",
            Some(json!({ "title": "Long Story", "type": "series" })),
            Some(&token),
        )
        .await;
    let series = data_id(&series.body);
    let created = app
        .request(
            "POST",
            &format!("/api/films/{series}/episodes"),
            Some(json!({ "number": 1, "title": " Pilot " })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["data"]["title"], "Pilot");
}
