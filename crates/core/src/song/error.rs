//! Song error types.

use thiserror::Error;
use uuid::Uuid;

use mixtape_shared::AppError;

use crate::storage::StorageError;

/// Song operation errors.
#[derive(Debug, Error)]
pub enum SongError {
    /// Song not found.
    #[error("song not found: {0}")]
    NotFound(Uuid),

    /// Invalid upload input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl SongError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<SongError> for AppError {
    fn from(err: SongError) -> Self {
        match err {
            SongError::NotFound(id) => Self::NotFound(format!("song {id}")),
            SongError::Validation(msg) => Self::Validation(msg),
            SongError::Storage(
                e @ (StorageError::FileTooLarge { .. } | StorageError::InvalidMimeType { .. }),
            ) => Self::Validation(e.to_string()),
            SongError::Storage(e) => Self::ExternalService(e.to_string()),
            SongError::Repository(msg) => Self::Database(msg),
        }
    }
}
