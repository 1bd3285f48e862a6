//! Per-request orchestration of authentication, gateways, and history
//!
//! Each operation runs one step after another: at most one external call per
//! step and one history write per translation. A failed translation never
//! writes history.

use std::io::Write;
use std::sync::Arc;

use lingua_common::validators::{self, validate_document_name};
use lingua_common::{DocumentKind, Language, SourceLanguage};

use crate::auth::{AuthenticatedUser, Authenticator};
use crate::constants::UPLOAD_FILE_PREFIX;
use crate::db::{Database, HistoryDb, HistoryRecord, NewHistoryRecord};
use crate::document::{self, ExtractionError};
use crate::error::AppError;
use crate::speech::{AudioInput, SpeechError, SpeechRecognizer, SpeechSynthesizer, SynthesizedAudio};
use crate::translation::Translator;

/// External capabilities the controller calls through to
#[derive(Clone)]
pub struct Gateways {
    pub translator: Arc<dyn Translator>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

/// Spoken rendition of a translation
#[derive(Debug)]
pub enum SpeechOutput {
    /// Not requested for this kind of input
    Skipped,
    Ready(SynthesizedAudio),
    /// Synthesis failed; the translation itself stands
    Failed(AppError),
}

/// A completed translation
#[derive(Debug)]
pub struct TranslationOutcome {
    /// The history record written for this translation
    pub record: HistoryRecord,
    pub source: SourceLanguage,
    pub target: Language,
    pub speech: SpeechOutput,
}

/// Entry point for every user-facing operation
pub struct SessionController {
    auth: Authenticator,
    history: HistoryDb,
    gateways: Gateways,
}

impl SessionController {
    pub fn new(database: &Database, gateways: Gateways) -> Self {
        Self {
            auth: Authenticator::new(database.users.clone()),
            history: database.history.clone(),
            gateways,
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        Ok(self.auth.register(username, password).await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        Ok(self.auth.login(username, password).await?)
    }

    /// Translate typed text, record it, and synthesize the result
    pub async fn translate_text(
        &self,
        user: &AuthenticatedUser,
        text: &str,
        source: SourceLanguage,
        target: Language,
    ) -> Result<TranslationOutcome, AppError> {
        validators::validate_translation_text(text)?;

        let record = self.translate_and_record(user, text, source, target).await?;
        let speech = self.synthesize(&record.translated_text, target).await;

        Ok(TranslationOutcome {
            record,
            source,
            target,
            speech,
        })
    }

    /// Transcribe a recording, then continue as [`Self::translate_text`]
    pub async fn translate_speech(
        &self,
        user: &AuthenticatedUser,
        audio: &AudioInput,
        source: SourceLanguage,
        target: Language,
    ) -> Result<TranslationOutcome, AppError> {
        let transcript = self
            .gateways
            .recognizer
            .speech_to_text(audio, source)
            .await?;
        tracing::debug!(username = user.username(), chars = transcript.len(), "speech transcribed");

        self.translate_text(user, &transcript, source, target).await
    }

    /// Extract the text of an uploaded PDF or DOCX, translate, and record it
    ///
    /// The upload is validated by name before any parsing happens. Documents
    /// get no speech output.
    pub async fn translate_document(
        &self,
        user: &AuthenticatedUser,
        file_name: &str,
        bytes: Vec<u8>,
        source: SourceLanguage,
        target: Language,
    ) -> Result<TranslationOutcome, AppError> {
        let kind = validate_document_name(file_name)?;

        let text = tokio::task::spawn_blocking(move || extract_upload(&bytes, kind))
            .await
            .map_err(|e| AppError::Internal(format!("extraction task failed: {e}")))??;
        tracing::debug!(username = user.username(), %kind, chars = text.len(), "document extracted");

        let record = self.translate_and_record(user, &text, source, target).await?;

        Ok(TranslationOutcome {
            record,
            source,
            target,
            speech: SpeechOutput::Skipped,
        })
    }

    /// The user's translations, most recent first
    pub async fn history(&self, user: &AuthenticatedUser) -> Result<Vec<HistoryRecord>, AppError> {
        Ok(self.history.list_for(user.username()).await?)
    }

    async fn translate_and_record(
        &self,
        user: &AuthenticatedUser,
        text: &str,
        source: SourceLanguage,
        target: Language,
    ) -> Result<HistoryRecord, AppError> {
        let translated = self
            .gateways
            .translator
            .translate(text, source, target)
            .await
            .inspect_err(|e| {
                tracing::warn!(username = user.username(), error = %e, "translation failed");
            })?;

        let source_lang = source.to_string();
        let record = self
            .history
            .append(NewHistoryRecord {
                username: user.username(),
                input_text: text,
                source_lang: &source_lang,
                translated_text: &translated,
                target_lang: target.name(),
            })
            .await?;

        tracing::info!(
            username = user.username(),
            id = record.id,
            source_lang = %source,
            target_lang = %target,
            "translation recorded"
        );
        Ok(record)
    }

    async fn synthesize(&self, text: &str, target: Language) -> SpeechOutput {
        match self
            .gateways
            .synthesizer
            .text_to_speech(text, target.name())
            .await
        {
            Ok(audio) => SpeechOutput::Ready(audio),
            Err(e) => {
                tracing::warn!(target_lang = %target, error = %e, "speech synthesis failed");
                SpeechOutput::Failed(match e {
                    SpeechError::UnsupportedLanguage(_) => {
                        AppError::UnsupportedTtsLanguage(target.to_string())
                    }
                    other => other.into(),
                })
            }
        }
    }
}

/// Write the upload to a scoped temporary file and extract its text
///
/// The file is removed when this returns, whatever the outcome.
fn extract_upload(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    let mut upload = tempfile::Builder::new()
        .prefix(UPLOAD_FILE_PREFIX)
        .suffix(&format!(".{}", kind.extension()))
        .tempfile()?;
    upload.write_all(bytes)?;
    upload.flush()?;

    document::extract_text(upload.path(), kind)
}
