//! Easing curves for host presentation
//!
//! Engines progress linearly. Hosts may bend that progress for visuals (the
//! gauge ring eases out while its number counts linearly).

use serde::{Deserialize, Serialize};

/// Easing curve applied to a progress fraction in `[0, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Fast start, slow end (quadratic)
    EaseOut,
}

impl Easing {
    /// Map a progress fraction through the curve
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
        }
    }
}
