//! HTML views
//!
//! Pure functions from data to markup. Every value interpolated into the
//! markup goes through [`crate::html::escape`].

pub mod bills;
pub mod error;
pub mod layout;
pub mod loading;
pub mod login;
pub mod new_bill;
