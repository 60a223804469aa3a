//! Data models for the application
//!
//! Each sub-module represents one record the front end exchanges with the
//! gateway or the session store.

mod bill;
mod receipt;
mod session;

pub use bill::*;
pub use receipt::*;
pub use session::*;
