//! Test fixtures: bills and receipt files.

use billed_core::models::{Bill, BillStatus, SelectedFile};

/// Minimal valid 1x1 PNG bytes.
pub fn minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn receipt(name: &str, content_type: &str) -> SelectedFile {
    SelectedFile::new(name, content_type, minimal_png())
}

pub fn bill(id: &str, date: &str, status: BillStatus) -> Bill {
    Bill {
        id: Some(id.to_string()),
        email: "a@a".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: format!("bill {}", id),
        amount: Some(400),
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        file_url: Some(format!("https://localhost:3456/images/{}.jpg", id)),
        file_name: Some(format!("{}.jpg", id)),
        status,
    }
}

/// The three bills used by the ordering tests, in gateway order
pub fn unordered_bills() -> Vec<Bill> {
    vec![
        bill("47qAXb6fIm2zOKkLzMro", "2021-01-01", BillStatus::Pending),
        bill("BeKy5Mo4jkmdfPGYpTxZ", "2022-06-15", BillStatus::Accepted),
        bill("UIUZtnPQvnbFnB0ozvJh", "2020-03-03", BillStatus::Refused),
    ]
}
