//! Translation text validation
//!
//! Applies to typed input and speech transcripts. Text extracted from
//! documents is not length-limited; blank extractions are rejected by the
//! extractor itself.

/// Maximum length for translation input in characters
pub const MAX_TRANSLATION_TEXT_LENGTH: usize = 100_000;

/// Validation error for translation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationTextError {
    /// Text is empty or whitespace only
    Empty,
    /// Text exceeds maximum length
    TooLong,
}

/// Validate text before sending it for translation
///
/// Checks:
/// - Contains at least one non-whitespace character
/// - Does not exceed maximum length (100,000 characters)
///
/// Control characters are allowed; pasted text routinely contains form
/// feeds and tabs.
///
/// # Errors
///
/// Returns a `TranslationTextError` variant describing the validation failure.
pub fn validate_translation_text(text: &str) -> Result<(), TranslationTextError> {
    if text.trim().is_empty() {
        return Err(TranslationTextError::Empty);
    }
    if text.chars().count() > MAX_TRANSLATION_TEXT_LENGTH {
        return Err(TranslationTextError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_text() {
        assert!(validate_translation_text("Hello, world!").is_ok());
        assert!(validate_translation_text("नमस्ते").is_ok());
        assert!(validate_translation_text("line one\nline two\ttabbed").is_ok());
        assert!(validate_translation_text(&"a".repeat(MAX_TRANSLATION_TEXT_LENGTH)).is_ok());
    }

    #[test]
    fn test_blank_text() {
        assert_eq!(validate_translation_text(""), Err(TranslationTextError::Empty));
        assert_eq!(
            validate_translation_text(" \n\t "),
            Err(TranslationTextError::Empty)
        );
    }

    #[test]
    fn test_too_long_counts_characters() {
        assert_eq!(
            validate_translation_text(&"a".repeat(MAX_TRANSLATION_TEXT_LENGTH + 1)),
            Err(TranslationTextError::TooLong)
        );
        // Multi-byte characters count once each
        assert!(validate_translation_text(&"é".repeat(MAX_TRANSLATION_TEXT_LENGTH)).is_ok());
    }
}
