//! The fixed language table
//!
//! Lingua translates between a closed set of six languages. Source input may
//! additionally be `auto`, leaving language detection to the model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Language used for speech synthesis when a name is not in the table
pub const DEFAULT_SPEECH_LANGUAGE: Language = Language::English;

/// Literal accepted for automatic source-language detection
pub const AUTO: &str = "auto";

/// A supported language, serialized by its English name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    English,
    Hindi,
    French,
    Spanish,
    German,
    Telugu,
}

impl Language {
    /// Every supported language, in selector order
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Display name, as shown in the language selectors and stored in history
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Two-letter ISO 639-1 code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::French => "fr",
            Self::Spanish => "es",
            Self::German => "de",
            Self::Telugu => "te",
        }
    }

    /// BCP-47 tag used for speech recognition
    #[must_use]
    pub fn speech_locale(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Hindi => "hi-IN",
            Self::French => "fr-FR",
            Self::Spanish => "es-ES",
            Self::German => "de-DE",
            Self::Telugu => "te-IN",
        }
    }

    /// Look up a language by name (case-insensitive, surrounding whitespace ignored)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unsupported language: {value}"))
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.name().to_string()
    }
}

/// Resolve a language name to its speech code
///
/// Names outside the table fall back to English (`en`).
#[must_use]
pub fn tts_code(name: &str) -> &'static str {
    Language::from_name(name)
        .unwrap_or(DEFAULT_SPEECH_LANGUAGE)
        .code()
}

/// Source language selection: a fixed language or automatic detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceLanguage {
    #[default]
    Auto,
    Fixed(Language),
}

impl SourceLanguage {
    /// The fixed language, if one was selected
    #[must_use]
    pub fn language(self) -> Option<Language> {
        match self {
            Self::Auto => None,
            Self::Fixed(language) => Some(language),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str(AUTO),
            Self::Fixed(language) => language.fmt(f),
        }
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(AUTO) {
            return Ok(Self::Auto);
        }
        Language::from_name(s)
            .map(Self::Fixed)
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

impl TryFrom<String> for SourceLanguage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceLanguage> for String {
    fn from(source: SourceLanguage) -> Self {
        source.to_string()
    }
}

impl From<Language> for SourceLanguage {
    fn from(language: Language) -> Self {
        Self::Fixed(language)
    }
}
