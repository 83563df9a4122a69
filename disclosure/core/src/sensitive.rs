//! Sensitive Info Detector
//!
//! The secure chat input warns when a draft mentions banking details. The
//! check is deliberately coarse: a whole-word, case-insensitive match on a
//! few keywords, re-run on every keystroke.

use std::sync::LazyLock;

use regex::Regex;

use crate::state::Language;

static SENSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII boundaries, so "accountë" still counts as the bare keyword
    Regex::new(r"(?i)(?-u:\b)(iban|ibn|account)(?-u:\b)")
        .expect("sensitive keyword pattern compiles")
});

/// A keyword hit in a chat draft
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SensitiveMatch {
    /// The keyword, lowercased
    pub keyword: String,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

/// First sensitive keyword in `text`, if any
#[must_use]
pub fn detect(text: &str) -> Option<SensitiveMatch> {
    SENSITIVE_PATTERN.find(text).map(|m| SensitiveMatch {
        keyword: m.as_str().to_lowercase(),
        start: m.start(),
        end: m.end(),
    })
}

/// Whether `text` mentions a sensitive keyword
#[must_use]
pub fn contains_sensitive(text: &str) -> bool {
    SENSITIVE_PATTERN.is_match(text)
}

/// Warning shown above the chat input
#[must_use]
pub fn warning(language: Language) -> &'static str {
    match language {
        Language::En => "Sensitive info detected. Share privately?",
        Language::Al => "Informacion i ndjeshëm i zbuluar. Ndani privatisht?",
    }
}
