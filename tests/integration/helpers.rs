//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

use cinedesk_api::{AppState, build_app};
use cinedesk_auth::PasswordHasher;
use cinedesk_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LocalStorageConfig, LoggingConfig,
    NotificationConfig, ServerConfig, StorageConfig,
};
use cinedesk_database::DatabasePool;
use cinedesk_database::repositories::UserRepository;
use cinedesk_entity::user::{CreateUser, UserRole};
use cinedesk_storage::StorageManager;

/// Serializes tests that reset the shared database.
static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

pub const TEST_PASSWORD: &str = "integration-pass-123";

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    _media_dir: TempDir,
    _guard: MutexGuard<'static, ()>,
}

/// Status and parsed JSON body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Connect, migrate and empty the database. `None` when no test database
    /// is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("CINEDESK_TEST_DATABASE_URL") else {
            eprintln!("CINEDESK_TEST_DATABASE_URL not set, skipping");
            return None;
        };
        let guard = DATABASE_LOCK.lock().await;
        let media_dir = tempfile::tempdir().expect("Failed to create media dir");

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 0,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 30,
                run_migrations: true,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret-with-enough-length".into(),
                jwt_access_ttl_minutes: 15,
                jwt_refresh_ttl_hours: 1,
            },
            storage: StorageConfig {
                local: LocalStorageConfig {
                    root_path: media_dir.path().to_string_lossy().into_owned(),
                    public_base_url: "/media".into(),
                },
                ..StorageConfig::default()
            },
            notifications: NotificationConfig {
                fanout_batch_size: 2,
            },
            logging: LoggingConfig::default(),
        };

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        cinedesk_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        Self::clean_database(db.pool()).await;

        let storage = Arc::new(
            StorageManager::from_config(&config.storage)
                .await
                .expect("Failed to init storage"),
        );
        let pool = db.pool().clone();
        let router = build_app(AppState::new(Arc::new(config), db, storage));

        Some(Self {
            router,
            pool,
            _media_dir: media_dir,
            _guard: guard,
        })
    }

    async fn clean_database(pool: &PgPool) {
        sqlx::query(
            "TRUNCATE user_notifications, notifications, comments, reviews, subscribers, \
             episodes, films, members, genres, categories, plans, news, users CASCADE",
        )
        .execute(pool)
        .await
        .expect("Failed to clean database");
    }

    /// Insert an account with [`TEST_PASSWORD`].
    pub async fn create_user(&self, username: &str, role: UserRole) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(TEST_PASSWORD)
            .expect("Failed to hash password");
        UserRepository::new(self.pool.clone())
            .create(&CreateUser {
                username: username.to_string(),
                email: None,
                password_hash: hash,
                display_name: None,
                avatar_url: None,
                role,
            })
            .await
            .expect("Failed to create user")
            .id
    }

    /// Create an admin and sign in over HTTP, returning the access token.
    pub async fn admin_token(&self) -> String {
        self.create_user("root", UserRole::Admin).await;
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": "root", "password": TEST_PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"]["accessToken"]
            .as_str()
            .expect("access token")
            .to_string()
    }

    pub async fn create_film(&self, title: &str) -> Uuid {
        sqlx::query_scalar("INSERT INTO films (title, slug) VALUES ($1, $2) RETURNING id")
            .bind(title)
            .bind(format!("{}-{}", title.to_lowercase().replace(' ', "-"), Uuid::new_v4()))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to insert film")
    }

    pub async fn subscribe(&self, user: Uuid, film: Uuid) {
        sqlx::query("INSERT INTO subscribers (user_id, film_id) VALUES ($1, $2)")
            .bind(user)
            .bind(film)
            .execute(&self.pool)
            .await
            .expect("Failed to subscribe");
    }

    pub async fn delivery_count(&self, notification: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_notifications WHERE notification_id = $1")
            .bind(notification)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count deliveries")
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }
}

/// Parse the `data.id` field of a response.
pub fn data_id(body: &Value) -> Uuid {
    body["data"]["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("response carries an id")
}
