//! Translation history database operations
//!
//! History is append-only: records are never updated or deleted.

use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::SqlitePool;

use crate::db::sql;

/// A stored translation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: i64,
    pub username: String,
    pub input_text: String,
    pub source_lang: String,
    pub translated_text: String,
    pub target_lang: String,
    /// RFC 3339 UTC timestamp with microsecond precision
    pub timestamp: String,
}

/// A translation to append; the timestamp is assigned by the store
#[derive(Debug, Clone, Copy)]
pub struct NewHistoryRecord<'a> {
    pub username: &'a str,
    pub input_text: &'a str,
    pub source_lang: &'a str,
    pub translated_text: &'a str,
    pub target_lang: &'a str,
}

/// Row type for history queries
type HistoryRow = (i64, String, String, String, String, String, String);

impl From<HistoryRow> for HistoryRecord {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.0,
            username: row.1,
            input_text: row.2,
            source_lang: row.3,
            translated_text: row.4,
            target_lang: row.5,
            timestamp: row.6,
        }
    }
}

/// Current time in the fixed-width format history rows are sorted by
fn history_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Database access for translation history
#[derive(Clone)]
pub struct HistoryDb {
    pool: SqlitePool,
}

impl HistoryDb {
    /// Create a new HistoryDb instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a translation record
    ///
    /// Returns the stored record, including its server-assigned timestamp.
    pub async fn append(&self, record: NewHistoryRecord<'_>) -> Result<HistoryRecord, sqlx::Error> {
        let timestamp = history_timestamp();

        let result = sqlx::query(sql::SQL_INSERT_HISTORY)
            .bind(record.username)
            .bind(record.input_text)
            .bind(record.source_lang)
            .bind(record.translated_text)
            .bind(record.target_lang)
            .bind(&timestamp)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();

        let row: HistoryRow = sqlx::query_as(sql::SQL_SELECT_HISTORY_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(HistoryRecord::from(row))
    }

    /// All records for a user, most recent first (empty if none)
    pub async fn list_for(&self, username: &str) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let rows: Vec<HistoryRow> = sqlx::query_as(sql::SQL_SELECT_HISTORY_FOR_USER)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(HistoryRecord::from).collect())
    }
}
