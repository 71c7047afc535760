//! Member endpoints over the in-memory store.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_delete_member_detaches_credits() {
    let app = common::TestApp::new().await;
    let user = app.members.add_user().await;
    let token = app.admin_token();

    let created = app
        .request(
            "POST",
            "/api/members",
            Some(json!({
                "userId": user,
                "kind": "actor",
                "stageName": "  Lan Anh  ",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["stageName"], "Lan Anh");
    assert_eq!(created.body["data"]["kind"], "actor");

    let member: Uuid = created.body["data"]["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("member id");
    let film = app.members.add_film(vec![member], vec![member]).await;

    let deleted = app
        .request("DELETE", &format!("/api/members/{member}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Member deleted");
    assert_eq!(deleted.body["data"]["filmsDetached"], 1);

    let film = app.members.film(film).await.expect("film still exists");
    assert!(film.actors.is_empty());
    assert!(film.translators.is_empty());
    assert_eq!(app.members.member_count().await, 0);
}

#[tokio::test]
async fn test_second_member_for_user_conflicts() {
    let app = common::TestApp::new().await;
    let user = app.members.add_user().await;
    let token = app.admin_token();
    let body = json!({ "userId": user, "kind": "translator", "stageName": "Minh" });

    let first = app
        .request("POST", "/api/members", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/members", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(app.members.member_count().await, 1);
}

#[tokio::test]
async fn test_invalid_member_body_lists_fields() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": Uuid::new_v4(), "kind": "actor", "stageName": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
    assert!(response.body["details"]["stageName"].is_array());
}

#[tokio::test]
async fn test_unknown_kind_is_rejected() {
    let app = common::TestApp::new().await;
    let user = app.members.add_user().await;
    let token = app.admin_token();

    let response = app
        .request(
            "POST",
            "/api/members",
            Some(json!({ "userId": user, "kind": "director", "stageName": "Khoa" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["kind"].is_array());
}

#[tokio::test]
async fn test_list_members_by_kind() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    for (kind, name) in [("actor", "A"), ("translator", "T"), ("actor", "B")] {
        let user = app.members.add_user().await;
        let response = app
            .request(
                "POST",
                "/api/members",
                Some(json!({ "userId": user, "kind": kind, "stageName": name })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = app
        .request("GET", "/api/members?kind=actor&limit=10", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["pagination"]["total"], 2);
    assert_eq!(response.body["pagination"]["limit"], 10);
}
