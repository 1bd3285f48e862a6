//! Speech gateway: speech-to-text and text-to-speech
//!
//! Both directions go through Google Cloud REST endpoints authenticated with
//! an API key. Synthesized audio is written to a temporary MP3 file that is
//! deleted when the returned [`SynthesizedAudio`] is dropped.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use lingua_common::{SourceLanguage, tts_code};
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_SPEECH_TO_TEXT_API_BASE, DEFAULT_TEXT_TO_SPEECH_API_BASE,
    GOOGLE_API_KEY_HEADER, TTS_FILE_PREFIX,
};

/// Recognition locale when the source language is `auto`
const AUTO_RECOGNITION_LOCALE: &str = "en-US";

/// Status text Google uses for rejected arguments
const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";

/// Largest `input.text` the synthesis endpoint accepts, in bytes
const MAX_SYNTHESIS_BYTES: usize = 5000;

/// Speech failures
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech could not be recognized")]
    Unintelligible,
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("speech synthesis does not support language code {0}")]
    UnsupportedLanguage(String),
    #[error("failed to store synthesized audio: {0}")]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::ServiceUnavailable(err.to_string())
    }
}

/// A recorded utterance
///
/// WAV and FLAC recordings carry their own sample rate and encoding in the
/// header, so only the raw bytes are needed.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub bytes: Vec<u8>,
}

impl AudioInput {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// Synthesized speech stored in a scoped temporary file
#[derive(Debug)]
pub struct SynthesizedAudio {
    file: NamedTempFile,
    language_code: &'static str,
}

impl SynthesizedAudio {
    /// Write MP3 bytes to a new temporary file
    pub fn from_mp3(bytes: &[u8], language_code: &'static str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(TTS_FILE_PREFIX)
            .suffix(".mp3")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            file,
            language_code,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Language code the audio was synthesized in
    pub fn language_code(&self) -> &'static str {
        self.language_code
    }

    /// Read the MP3 contents
    pub async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }
}

/// Speech-to-text capability
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe a recording; `source` selects the recognition language
    async fn speech_to_text(
        &self,
        audio: &AudioInput,
        source: SourceLanguage,
    ) -> Result<String, SpeechError>;
}

/// Text-to-speech capability
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in the language named `language`
    ///
    /// Names outside the language table fall back to English.
    async fn text_to_speech(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SpeechError>;
}

/// Connection settings for the Google speech APIs
#[derive(Clone)]
pub struct SpeechConfig {
    pub api_key: String,
    pub speech_to_text_base: String,
    pub text_to_speech_base: String,
    pub timeout: Duration,
}

impl SpeechConfig {
    /// Configuration with default endpoints and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            speech_to_text_base: DEFAULT_SPEECH_TO_TEXT_API_BASE.to_string(),
            text_to_speech_base: DEFAULT_TEXT_TO_SPEECH_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &"<REDACTED>")
            .field("speech_to_text_base", &self.speech_to_text_base)
            .field("text_to_speech_base", &self.text_to_speech_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

impl RecognizeResponse {
    /// Best alternative of each result, joined; `None` if nothing was heard
    fn into_transcript(self) -> Option<String> {
        let transcript = self
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!transcript.is_empty()).then_some(transcript)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Deserialize)]
struct GoogleErrorResponse {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

impl GoogleError {
    /// Whether the rejection concerns the requested voice or language
    fn is_unsupported_voice(&self) -> bool {
        let message = self.message.to_lowercase();
        self.status == INVALID_ARGUMENT
            && (message.contains("voice") || message.contains("language"))
    }
}

/// Split `text` into pieces of at most `max_bytes`, preferring whitespace
///
/// A run without whitespace longer than `max_bytes` is cut at a character
/// boundary.
fn synthesis_segments(text: &str, max_bytes: usize) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if rest.len() <= max_bytes {
            segments.push(rest);
            break;
        }

        let mut end = max_bytes;
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let cut = rest[..end]
            .rfind(char::is_whitespace)
            .filter(|&i| i > 0)
            .unwrap_or(end);

        segments.push(rest[..cut].trim_end());
        rest = rest[cut..].trim_start();
    }

    segments
}

/// Google Cloud [`SpeechRecognizer`] and [`SpeechSynthesizer`]
pub struct GoogleSpeechClient {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl GoogleSpeechClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn recognize_url(&self) -> String {
        format!(
            "{}/v1/speech:recognize",
            self.config.speech_to_text_base.trim_end_matches('/')
        )
    }

    fn synthesize_url(&self) -> String {
        format!(
            "{}/v1/text:synthesize",
            self.config.text_to_speech_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn speech_to_text(
        &self,
        audio: &AudioInput,
        source: SourceLanguage,
    ) -> Result<String, SpeechError> {
        if audio.bytes.is_empty() {
            return Err(SpeechError::Unintelligible);
        }

        let language_code = source
            .language()
            .map_or(AUTO_RECOGNITION_LOCALE, |l| l.speech_locale());
        let payload = serde_json::json!({
            "config": { "languageCode": language_code },
            "audio": { "content": BASE64.encode(&audio.bytes) }
        });

        let resp = self
            .client
            .post(self.recognize_url())
            .header(GOOGLE_API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "speech recognition rejected");
            return Err(SpeechError::ServiceUnavailable(status.to_string()));
        }

        let body: RecognizeResponse = resp.json().await?;
        body.into_transcript().ok_or(SpeechError::Unintelligible)
    }
}

impl GoogleSpeechClient {
    /// Synthesize one segment and return its MP3 bytes
    async fn synthesize_segment(
        &self,
        text: &str,
        language_code: &'static str,
    ) -> Result<Vec<u8>, SpeechError> {
        let payload = serde_json::json!({
            "input": { "text": text },
            "voice": { "languageCode": language_code },
            "audioConfig": { "audioEncoding": "MP3" }
        });

        let resp = self
            .client
            .post(self.synthesize_url())
            .header(GOOGLE_API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST
                && serde_json::from_str::<GoogleErrorResponse>(&body)
                    .is_ok_and(|r| r.error.is_unsupported_voice())
            {
                return Err(SpeechError::UnsupportedLanguage(language_code.to_string()));
            }
            tracing::warn!(status = status.as_u16(), %body, "speech synthesis rejected");
            return Err(SpeechError::ServiceUnavailable(status.to_string()));
        }

        let body: SynthesizeResponse = resp.json().await?;
        BASE64
            .decode(body.audio_content.as_bytes())
            .map_err(|e| SpeechError::ServiceUnavailable(format!("invalid audio content: {e}")))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechClient {
    async fn text_to_speech(
        &self,
        text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let language_code = tts_code(language);

        // MP3 frames concatenate into one playable stream
        let mut mp3 = Vec::new();
        for segment in synthesis_segments(text, MAX_SYNTHESIS_BYTES) {
            mp3.extend(self.synthesize_segment(segment, language_code).await?);
        }
        if mp3.is_empty() {
            return Err(SpeechError::ServiceUnavailable(
                "empty audio content".to_string(),
            ));
        }

        Ok(SynthesizedAudio::from_mp3(&mp3, language_code)?)
    }
}
