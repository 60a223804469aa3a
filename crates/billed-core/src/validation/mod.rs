//! Validation modules

pub mod file;

pub use file::{FileValidationError, FileValidator, RECEIPT_FORMAT_MESSAGE};
