use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::models::SelectedFile;

/// Review status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl Display for BillStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BillStatus::Pending => write!(f, "pending"),
            BillStatus::Accepted => write!(f, "accepted"),
            BillStatus::Refused => write!(f, "refused"),
        }
    }
}

/// One expense-report line item
///
/// `date` stays an ISO `YYYY-MM-DD` string: ordering bills by that string is
/// ordering them chronologically. `amount` is `None` when the form value was
/// not a number, which goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub pct: i64,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
}

/// Reference returned by the gateway after a create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBill {
    /// Identifier later used to update the record (`key` on some backends)
    #[serde(alias = "key")]
    pub id: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Payload of a create call
#[derive(Debug, Clone)]
pub enum CreateBillRequest {
    /// Upload the raw receipt; the gateway answers with its storage reference
    Receipt { email: String, file: SelectedFile },
    /// Persist a complete record that has no identifier yet
    Record(Bill),
}

impl CreateBillRequest {
    pub fn email(&self) -> &str {
        match self {
            CreateBillRequest::Receipt { email, .. } => email,
            CreateBillRequest::Record(bill) => &bill.email,
        }
    }
}

/// Sort bills newest first by their ISO date string
pub fn sort_by_date_desc(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Parse the leading integer of a form value.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit, and `None` is returned when no digit was read ("12.5" gives 12,
/// "abc" gives `None`).
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
