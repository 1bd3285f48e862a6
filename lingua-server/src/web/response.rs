//! Error responses

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use lingua_common::ErrorKind;
use lingua_common::protocol::ErrorResponse;

use crate::constants::AUTH_REALM;
use crate::error::AppError;

/// An [`AppError`] bound to the locale of the request that produced it
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    locale: &'static str,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, locale: &'static str) -> Self {
        Self {
            error: error.into(),
            locale,
        }
    }
}

/// Attach a request locale to a fallible result
pub trait Localize<T> {
    fn localize(self, locale: &'static str) -> Result<T, ApiError>;
}

impl<T, E: Into<AppError>> Localize<T> for Result<T, E> {
    fn localize(self, locale: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, locale))
    }
}

/// Body of an error response (also used for non-fatal audio failures)
pub fn error_body(error: &AppError, locale: &str) -> ErrorResponse {
    ErrorResponse {
        kind: error.kind().into(),
        message: error.user_message(locale),
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::DuplicateUser => StatusCode::CONFLICT,
        ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorKind::UnintelligibleAudio
        | ErrorKind::UnsupportedTtsLanguage
        | ErrorKind::ExtractionFailure => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::SpeechServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::TranslationServiceFailure => StatusCode::BAD_GATEWAY,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.error.kind();
        if kind == ErrorKind::Internal {
            tracing::error!(error = %self.error, "request failed");
        }

        let status = status_for(kind);
        let mut response = (status, Json(error_body(&self.error, self.locale))).into_response();
        if status == StatusCode::UNAUTHORIZED
            && let Ok(challenge) =
                HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\", charset=\"UTF-8\""))
        {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }
        response
    }
}
