//! Shared constants

/// Key under which the session record is persisted.
pub const USER_SESSION_KEY: &str = "user";

/// Name of the remote collection holding bill records.
pub const BILLS_COLLECTION: &str = "bills";

/// Receipt content types accepted when none are configured.
pub const DEFAULT_RECEIPT_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Fallback VAT percentage applied when the form value is not a number.
pub const DEFAULT_VAT_PCT: i64 = 20;
