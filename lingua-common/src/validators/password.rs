//! Password validation
//!
//! Two contexts:
//! - `validate_password` - registration (must not be empty)
//! - `validate_password_input` - login (empty allowed; verification simply fails)

/// Maximum length for passwords in bytes
///
/// Bounds the input fed to Argon2.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Validation error for passwords
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Password is empty
    Empty,
    /// Password exceeds maximum length
    TooLong,
}

/// Validate a password supplied at login
///
/// Only the length bound is checked. Control characters are accepted since
/// they may be part of a passphrase or generated password.
///
/// # Errors
///
/// Returns `PasswordError::TooLong` if the password exceeds 256 bytes.
pub fn validate_password_input(password: &str) -> Result<(), PasswordError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

/// Validate a password chosen at registration
///
/// Checks:
/// - Not empty
/// - Does not exceed maximum length (256 bytes)
///
/// # Errors
///
/// Returns a `PasswordError` variant describing the validation failure.
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    validate_password_input(password)
}
