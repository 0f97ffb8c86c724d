//! Song service for the music library.
//!
//! This module provides business logic for songs including:
//! - Upload validation and object storage orchestration
//! - Listing the library
//! - Deletion of metadata records

mod error;
mod service;
mod types;

pub use error::SongError;
pub use service::{SongRepository, SongService};
pub use types::{CreateSongInput, FileUpload, Song, UploadSongInput};
