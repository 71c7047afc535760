//! S3-compatible object storage provider.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream as S3Body;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tracing::{debug, info};

use cinedesk_core::config::S3StorageConfig;
use cinedesk_core::error::{AppError, ErrorKind};
use cinedesk_core::result::AppResult;
use cinedesk_core::traits::{ByteStream, StorageProvider};

use crate::key::{join_url, strip_base, validate_key};

/// Stores objects in one S3 bucket.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3StorageProvider {
    /// Build a client from configuration.
    ///
    /// Static keys are used when configured; otherwise credentials come from
    /// the default AWS provider chain (environment, profile, instance role).
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket is required"));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }
        if !config.access_key.is_empty() {
            builder = builder.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "cinedesk-config",
            ));
        }

        let public_base_url = if config.public_base_url.is_empty() {
            default_public_url(config)
        } else {
            config.public_base_url.clone()
        };

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url,
        })
    }
}

fn default_public_url(config: &S3StorageConfig) -> String {
    if config.endpoint.is_empty() {
        format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        )
    } else {
        format!(
            "{}/{}",
            config.endpoint.trim_end_matches('/'),
            config.bucket
        )
    }
}

fn storage_error(
    message: String,
    e: impl std::error::Error + Send + Sync + 'static,
) -> AppError {
    AppError::with_source(ErrorKind::Storage, message, e)
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn write(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        validate_key(key)?;
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(S3Body::from(data))
            .set_content_type(content_type.map(str::to_string))
            .send()
            .await
            .map_err(|e| storage_error(format!("Failed to upload object: {key}"), e))?;

        debug!(key, bytes = size, "Uploaded object");
        Ok(())
    }

    async fn write_stream(
        &self,
        key: &str,
        mut stream: ByteStream<'_>,
        content_type: Option<&str>,
    ) -> AppResult<u64> {
        validate_key(key)?;
        // PutObject needs a sized body; collect before sending so a failed
        // stream never creates an object.
        let mut buffer = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                match e.get_ref().and_then(|inner| inner.downcast_ref::<AppError>()) {
                    Some(app) => app.clone(),
                    None => storage_error(format!("Failed to read upload for {key}"), e),
                }
            })?;
            buffer.extend_from_slice(&chunk);
        }
        let size = buffer.len() as u64;
        self.write(key, buffer.freeze(), content_type).await?;
        Ok(size)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| storage_error(format!("Failed to delete object: {key}"), e))?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        validate_key(key)?;
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(storage_error(format!("Failed to stat object: {key}"), e)),
        }
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        strip_base(&self.public_base_url, url)
    }
}
