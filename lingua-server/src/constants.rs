//! Server-wide constants

/// Directory name under the platform data directory
pub const DATA_DIR_NAME: &str = "linguad";

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "lingua.db";

/// Locale used when a request does not ask for a supported one
pub const DEFAULT_LOCALE: &str = "en";

/// Locales with a message catalog
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es"];

/// HTTP Basic realm announced on authentication failures
pub const AUTH_REALM: &str = "lingua";

// ========================================================================
// External Service Defaults
// ========================================================================

/// Gemini model used for translation
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Base URL of the Gemini REST API
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Base URL of the Google Cloud Speech-to-Text REST API
pub const DEFAULT_SPEECH_TO_TEXT_API_BASE: &str = "https://speech.googleapis.com";

/// Base URL of the Google Cloud Text-to-Speech REST API
pub const DEFAULT_TEXT_TO_SPEECH_API_BASE: &str = "https://texttospeech.googleapis.com";

/// Timeout for a single call to an external service, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Header carrying the Google API key
pub const GOOGLE_API_KEY_HEADER: &str = "x-goog-api-key";

// ========================================================================
// Temporary Files
// ========================================================================

/// Prefix for synthesized speech files
pub const TTS_FILE_PREFIX: &str = "lingua-tts-";

/// Prefix for uploaded documents awaiting extraction
pub const UPLOAD_FILE_PREFIX: &str = "lingua-upload-";
