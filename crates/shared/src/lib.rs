//! Shared errors and configuration for Mixtape.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
