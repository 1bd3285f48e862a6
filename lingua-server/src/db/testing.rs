//! Shared database helpers for tests

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Create a migrated in-memory database
///
/// The pool is pinned to a single connection that never expires: every
/// SQLite `:memory:` connection is its own database.
pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
