//! Shared test helpers: mock HTTP services and in-process gateways

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use lingua_common::{Language, SourceLanguage, tts_code};
use tokio::net::TcpListener;

use crate::speech::{AudioInput, SpeechError, SpeechRecognizer, SpeechSynthesizer, SynthesizedAudio};
use crate::translation::{TranslationError, Translator};

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_mock_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Translator that tags the input with the target code, or always fails
#[derive(Default)]
pub struct FakeTranslator {
    pub fail: bool,
    pub calls: Mutex<Vec<(String, SourceLanguage, Language)>>,
}

impl FakeTranslator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: Language,
    ) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source, target));
        if self.fail {
            return Err(TranslationError::EmptyResponse);
        }
        Ok(format!("[{}] {text}", target.code()))
    }
}

/// Recognizer returning a fixed transcript, or a fixed failure
pub enum FakeRecognizer {
    Transcript(&'static str),
    Unintelligible,
}

#[async_trait]
impl SpeechRecognizer for FakeRecognizer {
    async fn speech_to_text(
        &self,
        _audio: &AudioInput,
        _source: SourceLanguage,
    ) -> Result<String, SpeechError> {
        match self {
            Self::Transcript(text) => Ok(text.to_string()),
            Self::Unintelligible => Err(SpeechError::Unintelligible),
        }
    }
}

/// Synthesizer writing a small fake MP3, or rejecting every language
pub struct FakeSynthesizer {
    pub reject: bool,
}

impl FakeSynthesizer {
    pub const MP3: &'static [u8] = b"ID3-fake";
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn text_to_speech(
        &self,
        _text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let code = tts_code(language);
        if self.reject {
            return Err(SpeechError::UnsupportedLanguage(code.to_string()));
        }
        Ok(SynthesizedAudio::from_mp3(Self::MP3, code)?)
    }
}
