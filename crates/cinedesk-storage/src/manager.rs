//! Storage manager: selects and holds the configured provider.

use std::sync::Arc;

use tracing::info;

use cinedesk_core::config::StorageConfig;
use cinedesk_core::error::AppError;
use cinedesk_core::result::AppResult;
use cinedesk_core::traits::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Handle to the media provider chosen at startup.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
}

impl StorageManager {
    /// Wrap an already constructed provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider named by `config.provider`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
            "local" => Arc::new(
                LocalStorageProvider::new(&config.local.root_path, &config.local.public_base_url)
                    .await?,
            ),
            "s3" => Self::s3(config).await?,
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider '{other}'"
                )));
            }
        };
        info!(provider = provider.provider_type(), "Storage provider ready");
        Ok(Self { provider })
    }

    #[cfg(feature = "s3")]
    async fn s3(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
        let provider = crate::providers::S3StorageProvider::new(&config.s3).await?;
        Ok(Arc::new(provider))
    }

    #[cfg(not(feature = "s3"))]
    async fn s3(_config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
        Err(AppError::configuration(
            "storage.provider = \"s3\" requires building with the `s3` feature",
        ))
    }

    /// The active provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Whether the active provider answers.
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinedesk_core::config::LocalStorageConfig;

    #[tokio::test]
    async fn test_from_config_local() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            local: LocalStorageConfig {
                root_path: dir.path().to_string_lossy().into_owned(),
                public_base_url: "/media".into(),
            },
            ..Default::default()
        };
        let manager = StorageManager::from_config(&config).await.unwrap();
        assert_eq!(manager.provider().provider_type(), "local");
        assert!(manager.health_check().await);
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = StorageConfig {
            provider: "ftp".into(),
            ..Default::default()
        };
        let err = StorageManager::from_config(&config).await.unwrap_err();
        assert!(err.message.contains("ftp"));
    }
}
