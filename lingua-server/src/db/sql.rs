//! SQL query constants for database operations
//!
//! This module contains all SQL queries used by the database layer.
//! Each query is documented with its parameters and special behaviors.

// ========================================================================
// User Query Operations
// ========================================================================

/// Insert a new user
///
/// **Parameters:**
/// 1. `username: &str` - Unique username (case-sensitive)
/// 2. `password_hash: &str` - Argon2id hash in PHC string format
/// 3. `created_at: &str` - RFC 3339 UTC timestamp
///
/// **Note:** Fails with a unique-constraint violation if the username exists.
/// The caller maps that violation to "already exists".
pub const SQL_INSERT_USER: &str =
    "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)";

/// Select the stored password hash for a username
///
/// **Parameters:**
/// 1. `username: &str` - Exact username to look up
///
/// **Returns:** `(password_hash: String)`
pub const SQL_SELECT_PASSWORD_HASH: &str = "SELECT password_hash FROM users WHERE username = ?";

// ========================================================================
// History Query Operations
// ========================================================================

/// Append a translation record
///
/// **Parameters:**
/// 1. `username: &str`
/// 2. `input_text: &str`
/// 3. `source_lang: &str` - Language name or `auto`
/// 4. `translated_text: &str`
/// 5. `target_lang: &str` - Language name
/// 6. `timestamp: &str` - Server-assigned RFC 3339 UTC timestamp
pub const SQL_INSERT_HISTORY: &str = "INSERT INTO history (username, input_text, source_lang, translated_text, target_lang, timestamp) VALUES (?, ?, ?, ?, ?, ?)";

/// Select all translation records for a user, most recent first
///
/// **Parameters:**
/// 1. `username: &str`
///
/// **Returns:** Multiple rows of
/// `(id, username, input_text, source_lang, translated_text, target_lang, timestamp)`
///
/// **Note:** Timestamps share one fixed-width format, so text ordering is
/// chronological. Records written within the same microsecond fall back to
/// insertion order (`id DESC`).
pub const SQL_SELECT_HISTORY_FOR_USER: &str = "SELECT id, username, input_text, source_lang, translated_text, target_lang, timestamp FROM history WHERE username = ? ORDER BY timestamp DESC, id DESC";

/// Select a single translation record by ID
///
/// **Parameters:**
/// 1. `id: i64`
///
/// **Returns:** `(id, username, input_text, source_lang, translated_text, target_lang, timestamp)`
pub const SQL_SELECT_HISTORY_BY_ID: &str = "SELECT id, username, input_text, source_lang, translated_text, target_lang, timestamp FROM history WHERE id = ?";
