//! Object storage for audio files and cover art using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, Supabase Storage
//! - Local filesystem (development only)
//!
//! Objects are written under two key prefixes: `songs/` for audio files and
//! `covers/` for cover images. Keys embed a uuid disambiguator so concurrent
//! uploads never collide.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{MediaKind, StorageService};
