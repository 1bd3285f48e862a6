//! Username validation

/// Maximum length for usernames in characters
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Punctuation allowed in usernames besides letters and digits
const ALLOWED_PUNCTUATION: &[char] = &['_', '-', '.'];

/// Validation error for usernames
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty
    Empty,
    /// Username exceeds maximum length
    TooLong,
    /// Username contains invalid characters
    InvalidCharacters,
}

/// Validate a username
///
/// Checks:
/// - Not empty
/// - Does not exceed maximum length (32 characters)
/// - Contains only Unicode letters, digits, `_`, `-` and `.`
///
/// Usernames are compared case-sensitively by the credential store.
///
/// # Errors
///
/// Returns a `UsernameError` variant describing the validation failure.
pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if username.is_empty() {
        return Err(UsernameError::Empty);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UsernameError::TooLong);
    }
    if !username
        .chars()
        .all(|ch| ch.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&ch))
    {
        return Err(UsernameError::InvalidCharacters);
    }
    Ok(())
}
