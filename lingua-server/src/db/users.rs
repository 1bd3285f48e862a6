//! Credential store database operations

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use super::sql::{SQL_INSERT_USER, SQL_SELECT_PASSWORD_HASH};

/// Database access for user credentials
#[derive(Clone)]
pub struct UserDb {
    pool: SqlitePool,
}

impl UserDb {
    /// Create a new UserDb instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user with an already-hashed password
    ///
    /// Uniqueness is enforced by the `UNIQUE` constraint on `username`, so
    /// concurrent registrations of the same name cannot both succeed.
    ///
    /// Returns `true` if the user was created, `false` if the username is taken.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(SQL_INSERT_USER)
            .bind(username)
            .bind(password_hash)
            .bind(&created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Get the stored password hash for a username
    pub async fn get_password_hash(&self, username: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(SQL_SELECT_PASSWORD_HASH)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::create_test_db;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let users = UserDb::new(create_test_db().await);

        assert!(users.create_user("alice", "hash-a").await.unwrap());
        assert_eq!(
            users.get_password_hash("alice").await.unwrap(),
            Some("hash-a".to_string())
        );
    }

    #[tokio::test]
    async fn test_duplicate_keeps_original_hash() {
        let users = UserDb::new(create_test_db().await);

        assert!(users.create_user("alice", "hash-a").await.unwrap());
        assert!(!users.create_user("alice", "hash-b").await.unwrap());

        assert_eq!(
            users.get_password_hash("alice").await.unwrap(),
            Some("hash-a".to_string())
        );
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let users = UserDb::new(create_test_db().await);

        assert!(users.create_user("alice", "hash-a").await.unwrap());
        assert!(users.create_user("Alice", "hash-b").await.unwrap());
        assert_eq!(
            users.get_password_hash("Alice").await.unwrap(),
            Some("hash-b".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_user() {
        let users = UserDb::new(create_test_db().await);

        assert!(users.get_password_hash("nobody").await.unwrap().is_none());
    }
}
