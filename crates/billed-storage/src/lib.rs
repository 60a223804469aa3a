//! Billed Storage Library
//!
//! This crate provides the `BillsGateway` abstraction over the remote
//! `bills` collection together with its backends, and the key-value session
//! store that stands in for the browser's local storage.
//!
//! # Receipt key format
//!
//! Uploaded receipts are stored under `bills/{email}/{uuid}-{filename}`.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
#[cfg(feature = "gateway-http")]
pub mod http;
pub(crate) mod keys;
#[cfg(feature = "gateway-local")]
pub mod local;
pub mod memory;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use billed_core::GatewayBackend;
pub use factory::{create_gateway, create_key_value_store};
#[cfg(feature = "gateway-http")]
pub use http::{Auth, HttpBillsGateway};
#[cfg(feature = "gateway-local")]
pub use local::LocalBillsGateway;
pub use memory::MemoryBillsGateway;
pub use session::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SessionError, SessionStore,
};
pub use traits::{BillsGateway, GatewayError, GatewayResult};
