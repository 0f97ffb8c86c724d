//! Storage configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use mixtape_shared::config::StorageSettings;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, Supabase Storage
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (AWS S3, Cloudflare R2, Supabase).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket name, or the root path for the local provider.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum object size in bytes.
    pub max_file_size: u64,
    /// Base URL prepended to keys when building public URLs. When unset,
    /// URLs are derived from the provider.
    pub public_url_base: Option<String>,
    /// Allowed MIME types for audio uploads.
    pub allowed_audio_types: Vec<String>,
    /// Allowed MIME types for cover image uploads.
    pub allowed_cover_types: Vec<String>,
}

impl StorageConfig {
    /// Default max object size: 50MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            public_url_base: None,
            allowed_audio_types: Self::default_audio_types(),
            allowed_cover_types: Self::default_cover_types(),
        }
    }

    /// Set maximum object size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set the public URL base.
    #[must_use]
    pub fn with_public_url_base(mut self, base: impl Into<String>) -> Self {
        self.public_url_base = Some(base.into());
        self
    }

    /// Set allowed audio MIME types.
    #[must_use]
    pub fn with_allowed_audio_types(mut self, types: Vec<String>) -> Self {
        self.allowed_audio_types = types;
        self
    }

    /// Set allowed cover image MIME types.
    #[must_use]
    pub fn with_allowed_cover_types(mut self, types: Vec<String>) -> Self {
        self.allowed_cover_types = types;
        self
    }

    /// Default allowed MIME types for audio files.
    #[must_use]
    pub fn default_audio_types() -> Vec<String> {
        vec![
            "audio/mpeg".to_string(),
            "audio/mp4".to_string(),
            "audio/aac".to_string(),
            "audio/ogg".to_string(),
            "audio/wav".to_string(),
            "audio/x-wav".to_string(),
            "audio/flac".to_string(),
            "audio/webm".to_string(),
        ]
    }

    /// Default allowed MIME types for cover images.
    #[must_use]
    pub fn default_cover_types() -> Vec<String> {
        vec![
            "image/png".to_string(),
            "image/jpeg".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
        ]
    }

    /// Check if a MIME type is an allowed audio type.
    #[must_use]
    pub fn is_audio_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_audio_types.iter().any(|t| t == mime_type)
    }

    /// Check if a MIME type is an allowed cover image type.
    #[must_use]
    pub fn is_cover_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_cover_types.iter().any(|t| t == mime_type)
    }
}

impl TryFrom<&StorageSettings> for StorageConfig {
    type Error = StorageError;

    fn try_from(settings: &StorageSettings) -> Result<Self, Self::Error> {
        let provider = match settings.provider.as_str() {
            "s3" => StorageProvider::s3(
                require(settings.endpoint.as_deref(), "storage.endpoint")?,
                require(settings.bucket.as_deref(), "storage.bucket")?,
                require(settings.access_key_id.as_deref(), "storage.access_key_id")?,
                require(
                    settings.secret_access_key.as_deref(),
                    "storage.secret_access_key",
                )?,
                require(settings.region.as_deref(), "storage.region")?,
            ),
            "local" | "local_fs" => {
                StorageProvider::local_fs(settings.root.as_deref().unwrap_or("./uploads"))
            }
            other => {
                return Err(StorageError::configuration(format!(
                    "unknown storage provider '{other}'"
                )));
            }
        };

        let mut config = Self::new(provider).with_max_file_size(settings.max_upload_size);
        if let Some(base) = &settings.public_url_base {
            config = config.with_public_url_base(base.trim_end_matches('/'));
        }

        Ok(config)
    }
}

fn require<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, StorageError> {
    value.ok_or_else(|| StorageError::configuration(format!("missing {key}")))
}
