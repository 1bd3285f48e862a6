//! Registration and login against the credential store

use lingua_common::validators::{self, PasswordError as PasswordValidationError, UsernameError};
use thiserror::Error;

use crate::db::{self, PasswordError, UserDb};

/// Proof of a successful login
///
/// Only [`Authenticator::login`] constructs this, so any operation taking an
/// `&AuthenticatedUser` can only run for a verified user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Registration and login failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUser,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid username: {0:?}")]
    InvalidUsername(UsernameError),
    #[error("invalid password: {0:?}")]
    InvalidPassword(PasswordValidationError),
    #[error("password hashing failed: {0}")]
    Hash(PasswordError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Validation(e) => AuthError::InvalidPassword(e),
            e @ PasswordError::Hash(_) => AuthError::Hash(e),
        }
    }
}

/// Validates registrations and login attempts
#[derive(Clone)]
pub struct Authenticator {
    users: UserDb,
}

impl Authenticator {
    pub fn new(users: UserDb) -> Self {
        Self { users }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// `AuthError::DuplicateUser` if the username is taken (the existing
    /// account is left untouched); validation, hashing, or database errors
    /// otherwise.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        validators::validate_username(username).map_err(AuthError::InvalidUsername)?;
        validators::validate_password(password).map_err(AuthError::InvalidPassword)?;

        let password_hash = db::hash_password(password)?;
        if !self.users.create_user(username, &password_hash).await? {
            tracing::debug!(username, "registration rejected: username taken");
            return Err(AuthError::DuplicateUser);
        }

        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Check a username/password pair
    ///
    /// Unknown users, malformed input, and wrong passwords all yield `false`.
    ///
    /// # Errors
    ///
    /// Only database failures and corrupt stored hashes are errors.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if validators::validate_username(username).is_err()
            || validators::validate_password_input(password).is_err()
        {
            return Ok(false);
        }

        let Some(password_hash) = self.users.get_password_hash(username).await? else {
            return Ok(false);
        };

        Ok(db::verify_password(password, &password_hash)?)
    }

    /// Verify credentials and produce an [`AuthenticatedUser`]
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` when verification fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        if self.verify(username, password).await? {
            Ok(AuthenticatedUser {
                username: username.to_string(),
            })
        } else {
            tracing::debug!(username, "login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::create_test_db;

    async fn authenticator() -> Authenticator {
        Authenticator::new(UserDb::new(create_test_db().await))
    }

    #[tokio::test]
    async fn test_verify_after_register() {
        let auth = authenticator().await;

        assert!(!auth.verify("alice", "correct").await.unwrap());
        auth.register("alice", "correct").await.unwrap();

        assert!(auth.verify("alice", "correct").await.unwrap());
        assert!(!auth.verify("alice", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_first_credentials() {
        let auth = authenticator().await;

        auth.register("alice", "correct").await.unwrap();
        let second = auth.register("alice", "other").await;

        assert!(matches!(second, Err(AuthError::DuplicateUser)));
        assert!(auth.verify("alice", "correct").await.unwrap());
        assert!(!auth.verify("alice", "other").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let auth = authenticator().await;

        assert!(matches!(
            auth.register("", "pw").await,
            Err(AuthError::InvalidUsername(UsernameError::Empty))
        ));
        assert!(matches!(
            auth.register("bad name", "pw").await,
            Err(AuthError::InvalidUsername(UsernameError::InvalidCharacters))
        ));
        assert!(matches!(
            auth.register("alice", "").await,
            Err(AuthError::InvalidPassword(PasswordValidationError::Empty))
        ));
    }

    #[tokio::test]
    async fn test_login() {
        let auth = authenticator().await;
        auth.register("alice", "correct").await.unwrap();

        let user = auth.login("alice", "correct").await.unwrap();
        assert_eq!(user.username(), "alice");

        assert!(matches!(
            auth.login("alice", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("mallory", "correct").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_oversized_password_is_just_wrong() {
        let auth = authenticator().await;
        auth.register("alice", "correct").await.unwrap();

        let long = "x".repeat(validators::MAX_PASSWORD_LENGTH + 1);
        assert!(!auth.verify("alice", &long).await.unwrap());
    }
}
