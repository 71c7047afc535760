//! Route definitions for the CineDesk HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`. Every
//! route except `/api/health` and `/api/auth/*` requires an admin token,
//! enforced by the `AdminUser` extractor in each handler.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use cinedesk_entity::taxonomy::{Category, Genre};

use crate::handlers::{self, taxonomy};
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// When media is stored on the local filesystem it is also served from the
/// configured public base path.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let max_upload = config
        .storage
        .max_image_bytes
        .max(config.storage.max_video_bytes);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(notification_routes())
        .merge(member_routes())
        .merge(film_routes())
        .merge(episode_routes())
        .merge(taxonomy_routes())
        .merge(engagement_routes())
        .merge(plan_routes())
        .merge(news_routes())
        .merge(user_routes())
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .merge(media_routes().layer(DefaultBodyLimit::max(
            usize::try_from(max_upload).unwrap_or(usize::MAX),
        )));

    let mut router = Router::new().nest("/api", api_routes);

    let local = &config.storage.local;
    if config.storage.provider == "local" && local.public_base_url.starts_with('/') {
        router = router.nest_service(
            local.public_base_url.trim_end_matches('/'),
            ServeDir::new(&local.root_path),
        );
    }

    router
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list)
                .post(handlers::notification::create),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get)
                .put(handlers::notification::update)
                .delete(handlers::notification::delete),
        )
        .route("/notifications/{id}/deliveries", get(handlers::notification::deliveries))
        .route("/notifications/{id}/redeliver", post(handlers::notification::redeliver))
        .route("/user-notifications/{id}/read", put(handlers::notification::mark_read))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(handlers::member::list).post(handlers::member::create))
        .route(
            "/members/{id}",
            get(handlers::member::get)
                .put(handlers::member::update)
                .delete(handlers::member::delete),
        )
}

fn film_routes() -> Router<AppState> {
    Router::new()
        .route("/films", get(handlers::film::list).post(handlers::film::create))
        .route(
            "/films/{id}",
            get(handlers::film::get)
                .put(handlers::film::update)
                .delete(handlers::film::delete),
        )
        .route("/films/{id}/subscribers", get(handlers::film::subscribers))
        .route(
            "/films/{id}/episodes",
            get(handlers::film::episodes)
                .post(handlers::film::create_episode),
        )
}

fn episode_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/episodes/{id}",
            get(handlers::episode::get)
                .put(handlers::episode::update)
                .delete(handlers::episode::delete),
        )
}

fn taxonomy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/genres",
            get(taxonomy::list::<Genre>).post(taxonomy::create::<Genre>),
        )
        .route(
            "/genres/{id}",
            get(taxonomy::get::<Genre>)
                .put(taxonomy::update::<Genre>)
                .delete(taxonomy::delete::<Genre>),
        )
        .route(
            "/categories",
            get(taxonomy::list::<Category>).post(taxonomy::create::<Category>),
        )
        .route(
            "/categories/{id}",
            get(taxonomy::get::<Category>)
                .put(taxonomy::update::<Category>)
                .delete(taxonomy::delete::<Category>),
        )
}

fn engagement_routes() -> Router<AppState> {
    use handlers::{comment, review};
    Router::new()
        .route("/reviews", get(review::list))
        .route("/reviews/{id}", delete(review::delete))
        .route("/comments", get(comment::list))
        .route("/comments/{id}", delete(comment::delete))
        .route("/comments/{id}/visibility", put(comment::set_visibility))
}

fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(handlers::plan::list).post(handlers::plan::create))
        .route(
            "/plans/{id}",
            get(handlers::plan::get)
                .put(handlers::plan::update)
                .delete(handlers::plan::delete),
        )
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(handlers::news::list).post(handlers::news::create))
        .route(
            "/news/{id}",
            get(handlers::news::get)
                .put(handlers::news::update)
                .delete(handlers::news::delete),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list).post(handlers::user::create))
        .route(
            "/users/{id}",
            get(handlers::user::get)
                .put(handlers::user::update)
                .delete(handlers::user::delete),
        )
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/media", delete(handlers::media::delete))
        .route("/media/images", post(handlers::media::upload_image))
        .route("/media/videos", post(handlers::media::upload_video))
}
