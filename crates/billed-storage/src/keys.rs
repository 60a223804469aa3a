//! Shared key generation for gateway backends.
//!
//! Key format: `bills/{email}/{uuid}-{filename}`. An empty email is stored
//! under `bills/anonymous/`.

use uuid::Uuid;

/// Generate a storage key for a receipt uploaded by `email`.
///
/// Path separators and parent-directory sequences are stripped from both
/// parts so the key always stays inside the `bills/` prefix.
pub fn generate_receipt_key(email: &str, filename: &str) -> String {
    let owner = sanitize_segment(email);
    let owner = if owner.is_empty() {
        "anonymous".to_string()
    } else {
        owner
    };
    format!(
        "bills/{}/{}-{}",
        owner,
        Uuid::new_v4(),
        sanitize_segment(filename)
    )
}

fn sanitize_segment(segment: &str) -> String {
    // Separators go first so removing them cannot join dots into a new `..`.
    let mut cleaned: String = segment
        .chars()
        .filter(|c| *c != '/' && *c != '\\')
        .collect();
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "");
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = generate_receipt_key("employee@test.tld", "test.jpg");
        assert!(key.starts_with("bills/employee@test.tld/"));
        assert!(key.ends_with("-test.jpg"));
    }

    #[test]
    fn test_key_strips_traversal() {
        let key = generate_receipt_key("../..", "../../etc/passwd");
        assert!(key.starts_with("bills/anonymous/"));
        assert!(!key.contains(".."));
        assert_eq!(key.matches('/').count(), 2);
    }

    #[test]
    fn test_separator_between_dots_does_not_leave_traversal() {
        let key = generate_receipt_key("a./.b", "x.\\.png");
        assert!(!key.contains(".."));
        assert!(key.starts_with("bills/ab/"));
        assert!(key.ends_with("-xpng"));
    }
}
