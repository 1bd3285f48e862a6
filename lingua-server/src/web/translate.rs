//! Translation endpoints: typed text, recorded speech, and documents

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lingua_common::protocol::{TranslateRequest, TranslationResponse};
use lingua_common::{Language, SourceLanguage};

use crate::error::{AppError, InputError};
use crate::session::{SpeechOutput, TranslationOutcome};
use crate::speech::AudioInput;
use crate::web::account::malformed;
use crate::web::response::error_body;
use crate::web::{ApiError, AppState, Authenticated, Localize};

/// Multipart field carrying a speech recording
const AUDIO_FIELD: &str = "audio";

/// Multipart field carrying a document
const FILE_FIELD: &str = "file";

/// `POST /api/translate`
pub async fn translate_text(
    State(state): State<AppState>,
    auth: Authenticated,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = body.map_err(malformed).localize(auth.locale)?;

    let outcome = state
        .session
        .translate_text(&auth.user, &request.text, request.source, request.target)
        .await
        .localize(auth.locale)?;

    Ok(Json(translation_response(outcome, auth.locale).await))
}

/// `POST /api/translate/speech` (multipart: `audio`, `source`, `target`)
pub async fn translate_speech(
    State(state): State<AppState>,
    auth: Authenticated,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let upload = read_upload(multipart, AUDIO_FIELD).await.localize(auth.locale)?;

    let outcome = state
        .session
        .translate_speech(
            &auth.user,
            &AudioInput::new(upload.bytes),
            upload.source,
            upload.target,
        )
        .await
        .localize(auth.locale)?;

    Ok(Json(translation_response(outcome, auth.locale).await))
}

/// `POST /api/translate/document` (multipart: `file`, `source`, `target`)
pub async fn translate_document(
    State(state): State<AppState>,
    auth: Authenticated,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let upload = read_upload(multipart, FILE_FIELD).await.localize(auth.locale)?;

    let outcome = state
        .session
        .translate_document(
            &auth.user,
            &upload.file_name,
            upload.bytes,
            upload.source,
            upload.target,
        )
        .await
        .localize(auth.locale)?;

    Ok(Json(translation_response(outcome, auth.locale).await))
}

async fn translation_response(outcome: TranslationOutcome, locale: &str) -> TranslationResponse {
    let (audio_mp3_base64, audio_error) = match outcome.speech {
        SpeechOutput::Skipped => (None, None),
        SpeechOutput::Ready(audio) => match audio.read_bytes().await {
            Ok(mp3) => (Some(BASE64.encode(mp3)), None),
            Err(e) => {
                let error = AppError::Internal(format!("failed to read synthesized audio: {e}"));
                tracing::error!(error = %error, "speech output lost");
                (None, Some(error_body(&error, locale)))
            }
        },
        SpeechOutput::Failed(error) => (None, Some(error_body(&error, locale))),
    };

    TranslationResponse {
        input_text: outcome.record.input_text,
        source: outcome.source,
        translated_text: outcome.record.translated_text,
        target: outcome.target,
        audio_mp3_base64,
        audio_error,
    }
}

/// A multipart upload with its language selection
#[derive(Debug)]
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
    source: SourceLanguage,
    target: Language,
}

/// Read the `file_field` part and the `source`/`target` fields
///
/// Unknown fields are ignored; `source` defaults to `auto`.
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
    file_field: &'static str,
) -> Result<Upload, InputError> {
    let mut multipart = multipart.map_err(|e| InputError::Malformed(e.body_text()))?;

    let mut file = None;
    let mut source = SourceLanguage::Auto;
    let mut target = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| InputError::Malformed(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| InputError::Malformed(e.body_text()))?;
            file = Some((file_name, bytes.to_vec()));
        } else if name == "source" || name == "target" {
            let value = field
                .text()
                .await
                .map_err(|e| InputError::Malformed(e.body_text()))?;
            if name == "source" {
                source = value
                    .parse()
                    .map_err(|_| InputError::InvalidLanguage(value))?;
            } else {
                target = Some(
                    Language::from_name(&value).ok_or(InputError::InvalidLanguage(value))?,
                );
            }
        }
    }

    let (file_name, bytes) = file.ok_or(InputError::MissingField(file_field))?;
    let target = target.ok_or(InputError::MissingField("target"))?;
    Ok(Upload {
        file_name,
        bytes,
        source,
        target,
    })
}
