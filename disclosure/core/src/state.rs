//! Application State
//!
//! The state every FinFund screen reads: interface language, the visitor's
//! role, the idea being pitched and the generated pitch. It is a plain value;
//! changes go through [`AppState::apply`], which returns the next state.

use serde::{Deserialize, Serialize};

/// Minimum idea length before a pitch can be generated
pub const MIN_IDEA_CHARS: usize = 20;

/// Maximum idea length accepted by the pitch coach
pub const MAX_IDEA_CHARS: usize = 500;

/// Interface language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Albanian
    Al,
}

impl Language {
    /// The other language
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Al,
            Self::Al => Self::En,
        }
    }

    /// Two-letter code
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Al => "al",
        }
    }
}

/// Who is using the app
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Founder seeking funding
    Founder,
    /// Investor browsing deals
    Investor,
    /// Bank officer reviewing loans
    Bank,
}

/// Sex recorded on a profile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Female
    Female,
    /// Male
    Male,
}

/// Profile of the demo founder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Trust score shown on the gauge
    pub trust_score: u8,
    /// Drives grant eligibility
    pub sex: Sex,
    /// Verification badges
    pub badges: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            trust_score: 91,
            sex: Sex::Female,
            badges: vec![
                "KYC Verified".to_string(),
                "Encrypted Vault".to_string(),
                "4 Peer Reviews".to_string(),
            ],
        }
    }
}

/// State transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Switch language
    SetLanguage(Language),
    /// Flip between the two languages
    ToggleLanguage,
    /// Pick a role
    SetRole(Role),
    /// Replace the idea text (truncated to [`MAX_IDEA_CHARS`])
    SetIdea(String),
    /// Store the generated pitch
    SetPitch(String),
}

/// Shared application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Interface language
    pub language: Language,
    /// Selected role, if any
    pub role: Option<Role>,
    /// Idea being pitched
    pub idea: String,
    /// Pitch produced by the coach
    pub pitch: String,
    /// Demo user profile
    pub profile: UserProfile,
}

impl AppState {
    /// Fresh state: English, no role, empty idea and pitch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` and return the resulting state
    #[must_use]
    pub fn apply(mut self, action: AppAction) -> Self {
        match action {
            AppAction::SetLanguage(language) => self.language = language,
            AppAction::ToggleLanguage => self.language = self.language.toggled(),
            AppAction::SetRole(role) => self.role = Some(role),
            AppAction::SetIdea(idea) => {
                self.idea = match idea.char_indices().nth(MAX_IDEA_CHARS) {
                    Some((cut, _)) => idea[..cut].to_string(),
                    None => idea,
                };
            }
            AppAction::SetPitch(pitch) => self.pitch = pitch,
        }
        self
    }

    /// Characters in the current idea
    #[must_use]
    pub fn idea_len(&self) -> usize {
        self.idea.chars().count()
    }

    /// Characters still missing before a pitch can be generated
    #[must_use]
    pub fn idea_chars_needed(&self) -> usize {
        MIN_IDEA_CHARS.saturating_sub(self.idea_len())
    }

    /// Whether the idea is long enough to generate a pitch
    #[must_use]
    pub fn can_generate_pitch(&self) -> bool {
        self.idea_chars_needed() == 0
    }

    /// Whether the trust screen shows the Women in Business grant line
    ///
    /// Only female founders qualify; investors and bank officers never see it.
    #[must_use]
    pub fn women_in_business_eligible(&self) -> bool {
        self.role == Some(Role::Founder) && self.profile.sex == Sex::Female
    }
}
