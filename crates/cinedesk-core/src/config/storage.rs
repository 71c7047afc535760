//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Active provider: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum accepted image upload in bytes (default 10 MB).
    #[serde(default = "default_max_image")]
    pub max_image_bytes: u64,
    /// Maximum accepted video upload in bytes (default 4 GB).
    #[serde(default = "default_max_video")]
    pub max_video_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_image_bytes: default_max_image(),
            max_video_bytes: default_max_video(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored media.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL under which the server exposes `root_path`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Public base URL for objects (CDN or bucket URL).
    #[serde(default)]
    pub public_base_url: String,
    /// Use path-style addressing (required by most MinIO setups).
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_image() -> u64 {
    10 * 1024 * 1024
}

fn default_max_video() -> u64 {
    4 * 1024 * 1024 * 1024
}

fn default_local_root() -> String {
    "./data/media".to_string()
}

fn default_public_base_url() -> String {
    "/media".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
