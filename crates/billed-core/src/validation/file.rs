//! Receipt file validation
//!
//! Only the MIME type declared by the file picker is checked. File contents
//! are never sniffed.

use crate::constants::DEFAULT_RECEIPT_CONTENT_TYPES;
use crate::models::SelectedFile;

/// Message shown when a receipt is not an accepted image.
pub const RECEIPT_FORMAT_MESSAGE: &str = "please select an image in JPEG, JPG, or PNG format.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileValidationError {
    #[error("{}", RECEIPT_FORMAT_MESSAGE)]
    UnsupportedContentType {
        file_name: String,
        content_type: String,
    },

    #[error("{}", RECEIPT_FORMAT_MESSAGE)]
    MissingContentType { file_name: String },
}

impl FileValidationError {
    pub fn file_name(&self) -> &str {
        match self {
            FileValidationError::UnsupportedContentType { file_name, .. } => file_name,
            FileValidationError::MissingContentType { file_name } => file_name,
        }
    }
}

/// Accepts a receipt iff its declared content type is one of the allowed ones.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct FileValidator {
    allowed_content_types: Vec<String>,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_RECEIPT_CONTENT_TYPES
                .iter()
                .map(|ct| ct.to_string())
                .collect(),
        )
    }
}

impl FileValidator {
    pub fn new(allowed_content_types: Vec<String>) -> Self {
        Self {
            allowed_content_types,
        }
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    pub fn validate(&self, file: &SelectedFile) -> Result<(), FileValidationError> {
        let content_type =
            file.content_type
                .as_deref()
                .ok_or_else(|| FileValidationError::MissingContentType {
                    file_name: file.name.clone(),
                })?;

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == content_type)
        {
            tracing::debug!(
                file_name = %file.name,
                content_type = %content_type,
                "Rejected receipt with unsupported content type"
            );
            return Err(FileValidationError::UnsupportedContentType {
                file_name: file.name.clone(),
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_image_types() {
        let validator = FileValidator::default();
        for (name, content_type) in [
            ("test.jpg", "image/jpg"),
            ("test.jpeg", "image/jpeg"),
            ("file.png", "image/png"),
        ] {
            let file = SelectedFile::new(name, content_type, "test");
            assert!(validator.validate(&file).is_ok(), "{} rejected", content_type);
        }
    }

    #[test]
    fn test_rejects_other_types_with_fixed_message() {
        let validator = FileValidator::default();
        for content_type in ["application/pdf", "image/gif", "text/plain", ""] {
            let file = SelectedFile::new("document.pdf", content_type, "document");
            let err = validator.validate(&file).unwrap_err();
            assert_eq!(err.to_string(), RECEIPT_FORMAT_MESSAGE);
            assert_eq!(err.file_name(), "document.pdf");
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let validator = FileValidator::default();
        let file = SelectedFile::new("test.PNG", "IMAGE/PNG", "test");
        assert!(matches!(
            validator.validate(&file),
            Err(FileValidationError::UnsupportedContentType { .. })
        ));
    }

    #[test]
    fn test_missing_content_type_is_rejected() {
        let validator = FileValidator::default();
        let file = SelectedFile::untyped("test.jpg", "test");
        assert!(matches!(
            validator.validate(&file),
            Err(FileValidationError::MissingContentType { .. })
        ));
    }

    #[test]
    fn test_extension_is_not_trusted() {
        let validator = FileValidator::default();
        let file = SelectedFile::new("photo.jpg", "application/octet-stream", "test");
        assert!(validator.validate(&file).is_err());
    }
}
