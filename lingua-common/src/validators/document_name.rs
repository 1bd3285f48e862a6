//! Uploaded document name validation

use crate::document::DocumentKind;

/// Maximum length for uploaded file names in characters
pub const MAX_DOCUMENT_NAME_LENGTH: usize = 255;

/// Validation error for uploaded document names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNameError {
    /// No file name was supplied
    Empty,
    /// File name exceeds maximum length
    TooLong,
    /// Extension is not `.pdf` or `.docx`
    UnsupportedType,
}

/// Validate an uploaded file name and determine its document kind
///
/// Only `.pdf` and `.docx` files are accepted (extension compared
/// case-insensitively). The name is never used as a filesystem path.
///
/// # Errors
///
/// Returns a `DocumentNameError` variant describing the validation failure.
pub fn validate_document_name(file_name: &str) -> Result<DocumentKind, DocumentNameError> {
    if file_name.trim().is_empty() {
        return Err(DocumentNameError::Empty);
    }
    if file_name.chars().count() > MAX_DOCUMENT_NAME_LENGTH {
        return Err(DocumentNameError::TooLong);
    }
    DocumentKind::from_file_name(file_name).ok_or(DocumentNameError::UnsupportedType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_kinds() {
        assert_eq!(validate_document_name("contract.pdf"), Ok(DocumentKind::Pdf));
        assert_eq!(validate_document_name("Letter.DOCX"), Ok(DocumentKind::Docx));
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_document_name(""), Err(DocumentNameError::Empty));
        assert_eq!(validate_document_name("  "), Err(DocumentNameError::Empty));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            validate_document_name("slides.pptx"),
            Err(DocumentNameError::UnsupportedType)
        );
        assert_eq!(
            validate_document_name("noextension"),
            Err(DocumentNameError::UnsupportedType)
        );
        assert_eq!(
            validate_document_name("old.doc"),
            Err(DocumentNameError::UnsupportedType)
        );
    }

    #[test]
    fn test_too_long() {
        let name = format!("{}.pdf", "a".repeat(MAX_DOCUMENT_NAME_LENGTH));
        assert_eq!(validate_document_name(&name), Err(DocumentNameError::TooLong));
    }
}
