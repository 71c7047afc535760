//! Image upload and delete against local storage.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_image_upload_is_stored_under_folder() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .multipart(
            "/api/media/images",
            &[
                ("folder", None, "posters"),
                ("file", Some("poster.png"), "fake png bytes"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["size"], 14);

    let key = response.body["fileName"].as_str().expect("file name").to_string();
    assert!(key.starts_with("images/posters/"));
    assert!(key.ends_with(".png"));
    assert!(app.media_dir.path().join(&key).exists());

    let deleted = app
        .request(
            "DELETE",
            "/api/media",
            Some(json!({ "fileName": key })),
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(!app.media_dir.path().join(&key).exists());
}

#[tokio::test]
async fn test_folder_after_file_discards_upload() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .multipart(
            "/api/media/images",
            &[
                ("file", Some("cover.jpg"), "jpeg bytes"),
                ("folder", None, "covers"),
            ],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let images = app.media_dir.path().join("images");
    let leftover = std::fs::read_dir(&images)
        .map(|entries| entries.filter_map(Result::ok).filter(|e| e.path().is_file()).count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn test_video_extension_rejected_for_image() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .multipart(
            "/api/media/images",
            &[("file", Some("clip.mp4"), "not an image")],
            &token,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["file"].is_array());
}

#[tokio::test]
async fn test_failed_video_attach_discards_upload() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();
    let film = uuid::Uuid::new_v4().to_string();

    let response = app
        .multipart(
            "/api/media/videos",
            &[
                ("filmId", None, &film),
                ("file", Some("trailer.mp4"), "video bytes"),
            ],
            &token,
        )
        .await;

    // The film lookup goes to an unreachable database.
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let videos = app.media_dir.path().join("videos");
    let leftover = std::fs::read_dir(&videos)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn test_delete_rejects_keys_outside_media() {
    let app = common::TestApp::new().await;
    let token = app.admin_token();

    let response = app
        .request(
            "DELETE",
            "/api/media",
            Some(json!({ "fileName": "../config/default.toml" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
