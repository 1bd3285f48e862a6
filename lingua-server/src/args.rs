//! Command-line argument parsing

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lingua_common::DEFAULT_PORT;
use lingua_server::constants::{
    DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_SPEECH_TO_TEXT_API_BASE, DEFAULT_TEXT_TO_SPEECH_API_BASE,
};
use lingua_server::speech::SpeechConfig;
use lingua_server::translation::TranslatorConfig;

/// Get default database path help text for current platform
fn default_database_help() -> String {
    #[cfg(target_os = "linux")]
    return "Database file path (default: ~/.local/share/linguad/lingua.db)".to_string();

    #[cfg(target_os = "macos")]
    return "Database file path (default: ~/Library/Application Support/linguad/lingua.db)"
        .to_string();

    #[cfg(target_os = "windows")]
    return "Database file path (default: %APPDATA%\\linguad\\lingua.db)".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return "Database file path (overrides platform default)".to_string();
}

/// Lingua translation server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// IP address to bind to (IPv4 or IPv6)
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database file path (overrides platform default)
    #[arg(short, long, help = default_database_help())]
    pub database: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model used for translation
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Gemini API base URL
    #[arg(long, default_value = DEFAULT_GEMINI_API_BASE)]
    pub gemini_api_base: String,

    /// Google Cloud API key for speech recognition and synthesis
    #[arg(long, env = "GOOGLE_SPEECH_API_KEY", hide_env_values = true)]
    pub speech_api_key: String,

    /// Speech-to-Text API base URL
    #[arg(long, default_value = DEFAULT_SPEECH_TO_TEXT_API_BASE)]
    pub speech_to_text_api_base: String,

    /// Text-to-Speech API base URL
    #[arg(long, default_value = DEFAULT_TEXT_TO_SPEECH_API_BASE)]
    pub text_to_speech_api_base: String,

    /// Timeout for each external service call, in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub http_timeout: u64,
}

impl Args {
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout: Duration::from_secs(self.http_timeout),
        }
    }

    pub fn speech_config(&self) -> SpeechConfig {
        SpeechConfig {
            api_key: self.speech_api_key.clone(),
            speech_to_text_base: self.speech_to_text_api_base.clone(),
            text_to_speech_base: self.text_to_speech_api_base.clone(),
            timeout: Duration::from_secs(self.http_timeout),
        }
    }
}
