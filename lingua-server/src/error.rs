//! Application error taxonomy
//!
//! Every failure a user can see is an [`AppError`]. Lower layers keep their
//! own error types and convert into this one; the HTTP layer renders it as
//! an [`ErrorKind`] plus a localized message.

use lingua_common::ErrorKind;
use lingua_common::validators::{
    DocumentNameError, MAX_DOCUMENT_NAME_LENGTH, MAX_PASSWORD_LENGTH,
    MAX_TRANSLATION_TEXT_LENGTH, MAX_USERNAME_LENGTH, PasswordError, TranslationTextError,
    UsernameError,
};
use thiserror::Error;

use crate::auth::AuthError;
use crate::document::ExtractionError;
use crate::i18n::{t, t_args};
use crate::speech::SpeechError;
use crate::translation::TranslationError;

/// Rejected request input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid username: {0:?}")]
    Username(UsernameError),
    #[error("invalid password: {0:?}")]
    Password(PasswordError),
    #[error("invalid text: {0:?}")]
    Text(TranslationTextError),
    #[error("invalid document name: {0:?}")]
    DocumentName(DocumentNameError),
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("unsupported language {0:?}")]
    InvalidLanguage(String),
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl InputError {
    fn user_message(&self, locale: &str) -> String {
        match self {
            Self::Username(UsernameError::Empty) => t(locale, "err-username-empty"),
            Self::Username(UsernameError::TooLong) => {
                with_max_length(locale, "err-username-too-long", MAX_USERNAME_LENGTH)
            }
            Self::Username(UsernameError::InvalidCharacters) => t(locale, "err-username-invalid"),
            Self::Password(PasswordError::Empty) => t(locale, "err-password-empty"),
            Self::Password(PasswordError::TooLong) => {
                with_max_length(locale, "err-password-too-long", MAX_PASSWORD_LENGTH)
            }
            Self::Text(TranslationTextError::Empty) => t(locale, "err-text-empty"),
            Self::Text(TranslationTextError::TooLong) => {
                with_max_length(locale, "err-text-too-long", MAX_TRANSLATION_TEXT_LENGTH)
            }
            Self::DocumentName(DocumentNameError::Empty) => t(locale, "err-document-name-empty"),
            Self::DocumentName(DocumentNameError::TooLong) => with_max_length(
                locale,
                "err-document-name-too-long",
                MAX_DOCUMENT_NAME_LENGTH,
            ),
            Self::DocumentName(DocumentNameError::UnsupportedType) => {
                t(locale, "err-document-unsupported-type")
            }
            Self::MissingField(field) => t_args(locale, "err-missing-field", &[("field", field)]),
            Self::InvalidLanguage(language) => {
                t_args(locale, "err-invalid-language", &[("language", language)])
            }
            Self::Malformed(reason) => {
                t_args(locale, "err-malformed-request", &[("reason", reason)])
            }
        }
    }
}

fn with_max_length(locale: &str, key: &str, max_length: usize) -> String {
    t_args(locale, key, &[("max_length", &max_length.to_string())])
}

/// User-visible failures
#[derive(Debug, Error)]
pub enum AppError {
    #[error("username already exists")]
    DuplicateUser,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("speech could not be recognized")]
    UnintelligibleAudio,
    #[error("speech service unavailable: {0}")]
    SpeechServiceUnavailable(String),
    #[error("speech synthesis unavailable for {0}")]
    UnsupportedTtsLanguage(String),
    #[error("text extraction failed: {0}")]
    ExtractionFailure(String),
    #[error("translation failed: {0}")]
    TranslationServiceFailure(String),
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// Database, hashing, or I/O failure; details are logged, not shown
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateUser => ErrorKind::DuplicateUser,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::UnintelligibleAudio => ErrorKind::UnintelligibleAudio,
            Self::SpeechServiceUnavailable(_) => ErrorKind::SpeechServiceUnavailable,
            Self::UnsupportedTtsLanguage(_) => ErrorKind::UnsupportedTtsLanguage,
            Self::ExtractionFailure(_) => ErrorKind::ExtractionFailure,
            Self::TranslationServiceFailure(_) => ErrorKind::TranslationServiceFailure,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Localized message suitable for showing to the user
    pub fn user_message(&self, locale: &str) -> String {
        match self {
            Self::DuplicateUser => t(locale, "err-duplicate-user"),
            Self::InvalidCredentials => t(locale, "err-invalid-credentials"),
            Self::UnintelligibleAudio => t(locale, "err-unintelligible-audio"),
            Self::SpeechServiceUnavailable(_) => t(locale, "err-speech-service-unavailable"),
            Self::UnsupportedTtsLanguage(language) => {
                t_args(locale, "err-unsupported-tts-language", &[("language", language)])
            }
            Self::ExtractionFailure(_) => t(locale, "err-extraction-failure"),
            Self::TranslationServiceFailure(_) => t(locale, "err-translation-service-failure"),
            Self::InvalidInput(e) => e.user_message(locale),
            Self::Internal(_) => t(locale, "err-internal"),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateUser => Self::DuplicateUser,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::InvalidUsername(e) => InputError::Username(e).into(),
            AuthError::InvalidPassword(e) => InputError::Password(e).into(),
            e @ (AuthError::Hash(_) | AuthError::Database(_)) => Self::Internal(e.to_string()),
        }
    }
}

impl From<TranslationError> for AppError {
    fn from(err: TranslationError) -> Self {
        Self::TranslationServiceFailure(err.to_string())
    }
}

impl From<SpeechError> for AppError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Unintelligible => Self::UnintelligibleAudio,
            SpeechError::ServiceUnavailable(reason) => Self::SpeechServiceUnavailable(reason),
            SpeechError::UnsupportedLanguage(code) => Self::UnsupportedTtsLanguage(code),
            e @ SpeechError::Io(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Io(e) => Self::Internal(e.to_string()),
            e => Self::ExtractionFailure(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<UsernameError> for AppError {
    fn from(err: UsernameError) -> Self {
        InputError::Username(err).into()
    }
}

impl From<TranslationTextError> for AppError {
    fn from(err: TranslationTextError) -> Self {
        InputError::Text(err).into()
    }
}

impl From<DocumentNameError> for AppError {
    fn from(err: DocumentNameError) -> Self {
        InputError::DocumentName(err).into()
    }
}
