//! Password hashing utilities using Argon2id
//!
//! Hashes are stored in PHC string format, which embeds the algorithm,
//! parameters, and the per-password random salt.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use lingua_common::validators;

/// Error type for password operations
#[derive(Debug)]
pub enum PasswordError {
    /// Password validation failed
    Validation(validators::PasswordError),
    /// Hashing or verification operation failed
    Hash(argon2::password_hash::Error),
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordError::Validation(e) => write!(f, "{:?}", e),
            PasswordError::Hash(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PasswordError {}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(err: argon2::password_hash::Error) -> Self {
        PasswordError::Hash(err)
    }
}

/// Hash a password with Argon2id and a fresh random salt
///
/// # Errors
///
/// Returns an error if the password fails registration validation or if
/// hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validators::validate_password(password).map_err(PasswordError::Validation)?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against a stored hash
///
/// Argon2 verification compares digests in constant time.
///
/// # Returns
///
/// * `Ok(true)` - Password matches the hash
/// * `Ok(false)` - Password does not match the hash
/// * `Err` - If the password is over-long, or the stored hash is malformed
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    validators::validate_password_input(password).map_err(PasswordError::Validation)?;

    let parsed_hash = PasswordHash::new(password_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct").unwrap();

        assert!(hash.starts_with("$argon2id$"), "Should be Argon2id hash");
        assert!(verify_password("correct", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_hash_never_contains_password() {
        let hash = hash_password("plaintext-secret").unwrap();
        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_empty_password_rejected_at_hashing() {
        assert!(matches!(
            hash_password(""),
            Err(PasswordError::Validation(validators::PasswordError::Empty))
        ));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(PasswordError::Hash(_))
        ));
    }
}
