//! Error types module
//!
//! `AppError` is the crate-wide error used at configuration and CLI
//! boundaries. Receipt validation and gateway calls have their own narrower
//! error enums (`FileValidationError`, `GatewayError`) that convert into it.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Describes how an error should be presented and logged
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "GATEWAY_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the failed operation could succeed if attempted again
    fn is_recoverable(&self) -> bool;

    /// Message safe to show to the user
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid receipt: {0}")]
    InvalidReceipt(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<crate::validation::FileValidationError> for AppError {
    fn from(err: crate::validation::FileValidationError) -> Self {
        AppError::InvalidReceipt(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, LogLevel) {
    match err {
        AppError::InvalidInput(_) => ("INVALID_INPUT", false, LogLevel::Debug),
        AppError::InvalidReceipt(_) => ("INVALID_RECEIPT", false, LogLevel::Debug),
        AppError::NotFound(_) => ("NOT_FOUND", false, LogLevel::Debug),
        AppError::Gateway(_) => ("GATEWAY_ERROR", true, LogLevel::Error),
        AppError::Session(_) => ("SESSION_ERROR", false, LogLevel::Warn),
        AppError::Config(_) => ("CONFIG_ERROR", false, LogLevel::Error),
        AppError::Internal(_) => ("INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => ("INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::InvalidReceipt(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            // Transport messages are shown as the gateway worded them.
            AppError::Gateway(ref msg) => msg.clone(),
            AppError::Session(_) => "Please sign in again".to_string(),
            AppError::Config(_) => "Application is misconfigured".to_string(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_gateway() {
        let err = AppError::Gateway("Erreur 500".to_string());
        assert_eq!(err.error_code(), "GATEWAY_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Erreur 500");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_invalid_receipt() {
        let err = AppError::InvalidReceipt("bad type".to_string());
        assert_eq!(err.error_code(), "INVALID_RECEIPT");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("disk full").context("writing index");
        let err = AppError::from(source);
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by: writing index"));
    }
}
