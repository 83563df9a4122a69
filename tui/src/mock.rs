//! Embedded demo content
//!
//! The demo ships the founder's idea, one generated pitch per language and
//! the founder's trust score. Nothing is fetched at runtime.

use serde::Deserialize;

use disclosure_core::Language;

const MOCK_JSON: &str = include_str!("../assets/mock.json");

/// Pitches keyed by language
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Pitches {
    /// English pitches
    pub en: Vec<String>,
    /// Albanian pitches
    pub al: Vec<String>,
}

/// Mock content bundled with the binary
#[derive(Clone, Debug, Deserialize)]
pub struct MockData {
    /// Idea the pitch coach starts with
    #[serde(default)]
    pub idea: String,
    /// Generated pitches
    pub pitches: Pitches,
    /// Founder trust score, 0..=100
    pub trust_score: u8,
}

impl MockData {
    /// Parse the embedded asset
    pub fn embedded() -> serde_json::Result<Self> {
        Self::from_json(MOCK_JSON)
    }

    /// Parse mock content from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut data: Self = serde_json::from_str(json)?;
        data.trust_score = data.trust_score.min(100);
        Ok(data)
    }

    /// First pitch for `language`, falling back to English
    pub fn pitch(&self, language: Language) -> &str {
        let localized = match language {
            Language::En => &self.pitches.en,
            Language::Al => &self.pitches.al,
        };
        localized
            .first()
            .or_else(|| self.pitches.en.first())
            .map_or("", String::as_str)
    }
}
