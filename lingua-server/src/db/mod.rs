//! Database module for SQLite persistence

mod history;
mod password;
pub mod sql;
#[cfg(test)]
pub mod testing;
mod users;

use std::io;
use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub use history::{HistoryDb, HistoryRecord, NewHistoryRecord};
pub use password::{PasswordError, hash_password, verify_password};
pub use users::UserDb;

use crate::constants::{DATA_DIR_NAME, DATABASE_FILE_NAME};

/// All database stores, sharing one connection pool
///
/// `SqlitePool` is reference-counted, so cloning is cheap.
#[derive(Clone)]
pub struct Database {
    pub users: UserDb,
    pub history: HistoryDb,
    pool: SqlitePool,
}

impl Database {
    /// Create the stores over an initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserDb::new(pool.clone()),
            history: HistoryDb::new(pool.clone()),
            pool,
        }
    }

    /// Close the pool, waiting for in-flight queries to finish
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Platform default database path
///
/// - Linux: `~/.local/share/linguad/lingua.db`
/// - macOS: `~/Library/Application Support/linguad/lingua.db`
/// - Windows: `%APPDATA%\linguad\lingua.db`
///
/// Creates the parent directory if it does not exist.
pub fn default_database_path() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::other("could not determine platform data directory"))?
        .join(DATA_DIR_NAME);
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}

/// Open (creating if needed) the database and apply pending migrations
pub async fn init_db(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
