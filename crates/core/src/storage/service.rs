//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Kind of media object, determining the key prefix and MIME allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Audio file, stored under `songs/`.
    Audio,
    /// Cover image, stored under `covers/`.
    Cover,
}

impl MediaKind {
    /// Key prefix for this kind of object.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Audio => "songs",
            Self::Cover => "covers",
        }
    }
}

/// Storage service for audio files and cover art.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the object size or MIME type is invalid.
    pub fn validate_upload(
        &self,
        kind: MediaKind,
        content_type: &str,
        size: u64,
    ) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        let allowed = match kind {
            MediaKind::Audio => self.config.is_audio_type_allowed(content_type),
            MediaKind::Cover => self.config.is_cover_type_allowed(content_type),
        };
        if !allowed {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate the storage key for an object.
    ///
    /// Format: `{prefix}/{disambiguator}-{sanitized_filename}`
    #[must_use]
    pub fn object_key(kind: MediaKind, disambiguator: Uuid, filename: &str) -> String {
        format!(
            "{}/{}-{}",
            kind.prefix(),
            disambiguator,
            sanitize_filename(filename)
        )
    }

    /// Write an object to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    /// Public URL for a stored object.
    ///
    /// With a configured base URL the result is `{base}/{key}`. Otherwise the
    /// URL is derived from the provider: virtual-hosted S3 style for S3,
    /// `/files/{key}` for the local provider (served by the dev server).
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        if let Some(base) = &self.config.public_url_base {
            return format!("{base}/{key}");
        }

        match &self.config.provider {
            StorageProvider::S3 { bucket, region, .. } => {
                format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
            }
            StorageProvider::LocalFs { .. } => format!("/files/{key}"),
        }
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket/root name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Sanitize filename for storage key.
///
/// Removes or replaces characters that could cause issues in storage paths.
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
