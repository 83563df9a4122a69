//! Score tiers
//!
//! Coarse display buckets for a 0-100 score. Hosts colour the gauge with the
//! tier of the value currently displayed, so the colour climbs through the
//! tiers as the gauge animates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display bucket for a score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// 90 and above
    Success,
    /// 70 to 89
    Primary,
    /// 50 to 69
    Warning,
    /// Below 50
    Error,
}

impl ScoreTier {
    /// Bucket a score. Total over `u8`; anything above 100 is `Success`.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Success,
            70..=89 => Self::Primary,
            50..=69 => Self::Warning,
            _ => Self::Error,
        }
    }

    /// Palette colour as RGB components
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Success => (0x10, 0xB9, 0x81),
            Self::Primary => (0x7E, 0x3E, 0xFF),
            Self::Warning => (0xF5, 0x9E, 0x0B),
            Self::Error => (0xEF, 0x44, 0x44),
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl From<u8> for ScoreTier {
    fn from(score: u8) -> Self {
        Self::from_score(score)
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
