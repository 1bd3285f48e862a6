//! Machine-readable error kinds
//!
//! These kinds are serialized to strings in API error responses, allowing
//! clients to react to the error type (e.g., switching to the login form
//! after a "duplicate_user" registration error) independently of the
//! localized message text.

use std::fmt;

/// Error kinds reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Registration attempted with a username that already exists
    DuplicateUser,

    /// Unknown username or wrong password
    InvalidCredentials,

    /// The speech recognizer could not produce a transcript
    UnintelligibleAudio,

    /// The speech service could not be reached or returned an error
    SpeechServiceUnavailable,

    /// The speech synthesizer rejected the requested language
    UnsupportedTtsLanguage,

    /// The uploaded document was empty or could not be parsed
    ExtractionFailure,

    /// The translation service could not be reached or returned an error
    TranslationServiceFailure,

    /// Request failed validation (empty text, bad file type, ...)
    InvalidInput,

    /// Unexpected server-side failure
    Internal,
}

impl ErrorKind {
    /// Convert to the string representation used in API responses
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateUser => "duplicate_user",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnintelligibleAudio => "unintelligible_audio",
            Self::SpeechServiceUnavailable => "speech_service_unavailable",
            Self::UnsupportedTtsLanguage => "unsupported_tts_language",
            Self::ExtractionFailure => "extraction_failure",
            Self::TranslationServiceFailure => "translation_service_failure",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }

    /// Parse from string (for client-side handling)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "duplicate_user" => Some(Self::DuplicateUser),
            "invalid_credentials" => Some(Self::InvalidCredentials),
            "unintelligible_audio" => Some(Self::UnintelligibleAudio),
            "speech_service_unavailable" => Some(Self::SpeechServiceUnavailable),
            "unsupported_tts_language" => Some(Self::UnsupportedTtsLanguage),
            "extraction_failure" => Some(Self::ExtractionFailure),
            "translation_service_failure" => Some(Self::TranslationServiceFailure),
            "invalid_input" => Some(Self::InvalidInput),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        kind.as_str().to_string()
    }
}
