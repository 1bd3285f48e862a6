//! Shared helpers for integration tests
//!
//! Runs the real router over a temporary database, with in-process
//! gateways standing in for the Google services.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use lingua_common::{Language, SourceLanguage, tts_code};
use lingua_server::db::{self, Database};
use lingua_server::session::{Gateways, SessionController};
use lingua_server::speech::{
    AudioInput, SpeechError, SpeechRecognizer, SpeechSynthesizer, SynthesizedAudio,
};
use lingua_server::translation::{TranslationError, Translator};
use lingua_server::web::{self, AppState};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Bytes every fake synthesis returns
pub const FAKE_MP3: &[u8] = b"ID3-integration";

/// Transcript every fake recognition returns
pub const FAKE_TRANSCRIPT: &str = "where is the station";

/// Prefixes the text with the target language code
pub struct TaggingTranslator;

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(
        &self,
        text: &str,
        _source: SourceLanguage,
        target: Language,
    ) -> Result<String, TranslationError> {
        Ok(format!("[{}] {text}", target.code()))
    }
}

/// Always fails like an unreachable service
pub struct BrokenTranslator;

#[async_trait]
impl Translator for BrokenTranslator {
    async fn translate(
        &self,
        _text: &str,
        _source: SourceLanguage,
        _target: Language,
    ) -> Result<String, TranslationError> {
        Err(TranslationError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

pub struct FixedRecognizer;

#[async_trait]
impl SpeechRecognizer for FixedRecognizer {
    async fn speech_to_text(
        &self,
        audio: &AudioInput,
        _source: SourceLanguage,
    ) -> Result<String, SpeechError> {
        if audio.bytes.is_empty() {
            return Err(SpeechError::Unintelligible);
        }
        Ok(FAKE_TRANSCRIPT.to_string())
    }
}

pub struct FakeSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn text_to_speech(
        &self,
        _text: &str,
        language: &str,
    ) -> Result<SynthesizedAudio, SpeechError> {
        Ok(SynthesizedAudio::from_mp3(FAKE_MP3, tts_code(language))?)
    }
}

/// A running server and the resources it owns
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    _data_dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register a user, asserting success
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }
}

/// Start a server whose translations succeed
pub async fn start_server() -> TestServer {
    start_server_with(Arc::new(TaggingTranslator)).await
}

/// Start a server with the given translator
pub async fn start_server_with(translator: Arc<dyn Translator>) -> TestServer {
    let data_dir = TempDir::new().unwrap();
    let pool = db::init_db(&data_dir.path().join("lingua.db")).await.unwrap();
    let database = Database::new(pool);

    let gateways = Gateways {
        translator,
        recognizer: Arc::new(FixedRecognizer),
        synthesizer: Arc::new(FakeSynthesizer),
    };
    let state = AppState::new(SessionController::new(&database, gateways));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(web::serve(listener, state, std::future::pending()));

    TestServer {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        _data_dir: data_dir,
    }
}
