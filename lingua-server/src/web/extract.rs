//! Request extractors: negotiated locale and HTTP Basic authentication

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::i18n::negotiate_locale;
use crate::web::AppState;
use crate::web::response::{ApiError, Localize};

/// Locale negotiated from `Accept-Language`
#[derive(Debug, Clone, Copy)]
pub struct Locale(pub &'static str);

impl Locale {
    fn from_headers(headers: &HeaderMap) -> Self {
        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        Self(negotiate_locale(accept_language))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Locale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// A request whose Basic credentials passed login
///
/// Credentials are checked on every request; there is no server-side session.
#[derive(Debug)]
pub struct Authenticated {
    pub user: AuthenticatedUser,
    pub locale: &'static str,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Locale(locale) = Locale::from_headers(&parts.headers);
        let (username, password) = basic_credentials(&parts.headers)
            .ok_or(AppError::InvalidCredentials)
            .localize(locale)?;

        let user = state
            .session
            .login(&username, &password)
            .await
            .localize(locale)?;
        Ok(Self { user, locale })
    }
}

/// Decode `Authorization: Basic <base64(username:password)>`
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
