//! Translation gateway backed by the Gemini `generateContent` API

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use lingua_common::{Language, SourceLanguage};
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, DEFAULT_HTTP_TIMEOUT_SECS,
    GOOGLE_API_KEY_HEADER,
};

/// Translation failures; all surface to users as a service failure
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("translation service returned no text")]
    EmptyResponse,
}

/// Text translation capability
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`; `source` may be [`SourceLanguage::Auto`]
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: Language,
    ) -> Result<String, TranslationError>;
}

/// Connection settings for the Gemini API
///
/// Built once at startup from process configuration.
#[derive(Clone)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl TranslatorConfig {
    /// Configuration with default model, endpoint, and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &"<REDACTED>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, trimmed; `None` if blank
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Gemini-backed [`Translator`]
pub struct GeminiTranslator {
    config: TranslatorConfig,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiTranslator {
    /// Create a translator with its own HTTP client
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            endpoint: config.endpoint(),
            config,
            client,
        })
    }

    fn build_prompt(text: &str, source: SourceLanguage, target: Language) -> String {
        format!("Translate this text from {source} to {target}: {text}")
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: Language,
    ) -> Result<String, TranslationError> {
        let payload = serde_json::json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(text, source, target) }]
            }]
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header(GOOGLE_API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, model = %self.config.model, "translation request rejected");
            return Err(TranslationError::Status { status, body });
        }

        let body: GenerateContentResponse = resp.json().await?;
        body.into_text().ok_or(TranslationError::EmptyResponse)
    }
}
