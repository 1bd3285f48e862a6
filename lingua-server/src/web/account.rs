//! Registration and login endpoints

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use lingua_common::protocol::{AccountResponse, Credentials};

use crate::error::InputError;
use crate::i18n::{t, t_args};
use crate::web::{ApiError, AppState, Locale, Localize};

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    Locale(locale): Locale,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(credentials) = body.map_err(malformed).localize(locale)?;

    state
        .session
        .register(&credentials.username, &credentials.password)
        .await
        .localize(locale)?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            username: credentials.username,
            message: t(locale, "msg-registered"),
        }),
    ))
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    Locale(locale): Locale,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(credentials) = body.map_err(malformed).localize(locale)?;

    let user = state
        .session
        .login(&credentials.username, &credentials.password)
        .await
        .localize(locale)?;

    Ok(Json(AccountResponse {
        username: user.username().to_string(),
        message: t_args(locale, "msg-welcome", &[("username", user.username())]),
    }))
}

pub(super) fn malformed(rejection: JsonRejection) -> InputError {
    InputError::Malformed(rejection.body_text())
}
