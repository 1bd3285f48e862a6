//! API message definitions for Lingua
//!
//! All requests and responses are JSON, except speech and document uploads
//! which are sent as `multipart/form-data` with the same `source`/`target`
//! fields as [`TranslateRequest`].
//!
//! ## Password Security
//!
//! Clients send passwords in plaintext in registration and login requests
//! and in the HTTP Basic `Authorization` header of every authenticated
//! request. Deploy behind TLS.
//!
//! The server hashes passwords using Argon2id with per-user salts before storing them.

use serde::{Deserialize, Serialize};

use crate::language::{Language, SourceLanguage};

/// Username and password, used by both registration and login
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Text translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    /// Source language, `"auto"` when omitted
    #[serde(default)]
    pub source: SourceLanguage,
    pub target: Language,
}

/// Result of a translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// The text that was translated (typed, transcribed, or extracted)
    pub input_text: String,
    pub source: SourceLanguage,
    pub translated_text: String,
    pub target: Language,
    /// Synthesized speech of the translation as base64-encoded MP3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_mp3_base64: Option<String>,
    /// Why speech synthesis failed (the translation itself still succeeded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_error: Option<ErrorResponse>,
}

/// Successful registration or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub username: String,
    pub message: String,
}

/// A single translation history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input_text: String,
    pub source_lang: String,
    pub translated_text: String,
    pub target_lang: String,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

/// Translation history, most recent first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// Language selector contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    /// `"auto"` followed by every supported language
    pub source: Vec<String>,
    pub target: Vec<String>,
}

/// Service liveness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable kind (see [`crate::ErrorKind`])
    pub kind: String,
    /// Localized, user-visible message
    pub message: String,
}

// Custom Debug implementation that redacts passwords
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("alice"));
        assert!(debug.contains("<REDACTED>"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_translate_request_defaults_to_auto() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text":"hola","target":"English"}"#).unwrap();
        assert_eq!(request.source, SourceLanguage::Auto);
        assert_eq!(request.target, Language::English);
    }

    #[test]
    fn test_translate_request_rejects_unknown_target() {
        let result =
            serde_json::from_str::<TranslateRequest>(r#"{"text":"hi","target":"Klingon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_translation_response_omits_missing_audio() {
        let response = TranslationResponse {
            input_text: "hello".to_string(),
            source: SourceLanguage::Auto,
            translated_text: "hola".to_string(),
            target: Language::Spanish,
            audio_mp3_base64: None,
            audio_error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["source"], "auto");
        assert_eq!(json["target"], "Spanish");
        assert!(json.get("audio_mp3_base64").is_none());
        assert!(json.get("audio_error").is_none());
    }
}
