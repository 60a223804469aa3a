//! Billed Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! receipt validation shared by the storage and web crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, GatewayBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{FileValidationError, FileValidator};
