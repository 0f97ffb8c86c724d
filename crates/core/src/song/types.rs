//! Song types and data structures.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Song domain model.
#[derive(Debug, Clone, Serialize)]
pub struct Song {
    /// Unique identifier.
    pub id: Uuid,
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Public URL of the cover image.
    pub cover_url: String,
    /// Public URL of the audio file.
    pub song_url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original filename.
    pub filename: String,
    /// MIME type of the file.
    pub content_type: String,
    /// File contents.
    pub bytes: Bytes,
}

impl FileUpload {
    /// Create a new file upload.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Bytes,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size of the file in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Input for uploading a song.
#[derive(Debug, Clone)]
pub struct UploadSongInput {
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Cover image file.
    pub cover: FileUpload,
    /// Audio file.
    pub song: FileUpload,
}

/// Input for creating a song record.
#[derive(Debug, Clone)]
pub struct CreateSongInput {
    /// Song ID.
    pub id: Uuid,
    /// Song title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Public URL of the cover image.
    pub cover_url: String,
    /// Public URL of the audio file.
    pub song_url: String,
}
