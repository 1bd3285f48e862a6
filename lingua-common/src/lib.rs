//! Lingua Common Library
//!
//! Shared types, API messages, and validators for the Lingua translation service.

pub mod document;
mod error_kind;
pub mod language;
pub mod protocol;
pub mod validators;

pub use document::DocumentKind;
pub use error_kind::ErrorKind;
pub use language::{DEFAULT_SPEECH_LANGUAGE, Language, SourceLanguage, tts_code};

/// Default port for the Lingua HTTP API
pub const DEFAULT_PORT: u16 = 8501;

/// Maximum accepted upload size (documents and audio recordings) in bytes
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
