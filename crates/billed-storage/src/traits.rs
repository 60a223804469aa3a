//! Bills gateway abstraction
//!
//! This module defines the `BillsGateway` trait that every backend of the
//! remote `bills` collection implements.

use async_trait::async_trait;
use billed_core::models::{Bill, CreateBillRequest, CreatedBill};
use billed_core::AppError;
use thiserror::Error;

/// Gateway operation errors
///
/// `Display` yields the message exactly as the backend worded it, so read
/// paths can show it to the user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with an error
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered garbage
    #[error("{0}")]
    Transport(String),

    #[error("Bill not found: {0}")]
    NotFound(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl GatewayError {
    /// Human-readable message carried by the error
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound(id) => AppError::NotFound(format!("Bill {}", id)),
            GatewayError::InvalidPayload(msg) => AppError::InvalidInput(msg),
            other => AppError::Gateway(other.to_string()),
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// The remote `bills` collection
///
/// Production backends and test doubles implement the same three operations.
#[async_trait]
pub trait BillsGateway: Send + Sync {
    /// Fetch every bill visible to the current user
    async fn list(&self) -> GatewayResult<Vec<Bill>>;

    /// Create a record, either by uploading a raw receipt or by persisting a
    /// complete bill, and return the reference used for later updates
    async fn create(&self, request: CreateBillRequest) -> GatewayResult<CreatedBill>;

    /// Replace the record identified by `bill.id`
    ///
    /// Fails with `InvalidPayload` when the bill has no identifier.
    async fn update(&self, bill: &Bill) -> GatewayResult<Bill>;
}

/// Extract the identifier required by `update`
pub(crate) fn require_id(bill: &Bill) -> GatewayResult<&str> {
    bill.id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::InvalidPayload("bill has no identifier".to_string()))
}
