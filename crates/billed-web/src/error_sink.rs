//! Console error channel
//!
//! Failures of detached gateway writes have nobody to return to. They are
//! handed to an [`ErrorSink`] exactly once and otherwise ignored.

use billed_storage::GatewayError;

pub trait ErrorSink: Send + Sync {
    /// Report a failed gateway call; `operation` names what was attempted
    fn report(&self, operation: &str, error: &GatewayError);
}

/// Production sink: one `error` event per failure
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, operation: &str, error: &GatewayError) {
        tracing::error!(operation = %operation, error = %error, "Gateway call failed");
    }
}
