//! CineDesk server: the back-office API for the streaming catalog.
//!
//! Loads configuration, connects PostgreSQL and media storage, then serves
//! the Axum application until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use cinedesk_api::AppState;
use cinedesk_core::AppResult;
use cinedesk_core::config::{AppConfig, LogFormat};
use cinedesk_database::DatabasePool;
use cinedesk_storage::StorageManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("CINEDESK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting CineDesk v{}", env!("CARGO_PKG_VERSION"));

    // ── Database ─────────────────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        cinedesk_database::migration::run_migrations(db.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }

    // ── Storage ──────────────────────────────────────────────────
    let storage = Arc::new(StorageManager::from_config(&config.storage).await?);

    // ── HTTP ─────────────────────────────────────────────────────
    let bind_address = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(Arc::new(config), db.clone(), storage);
    let app = cinedesk_api::build_app(state);

    let result = cinedesk_api::app::serve(app, &bind_address, grace).await;

    db.close().await;
    tracing::info!("CineDesk stopped");
    result
}
