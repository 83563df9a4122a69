//! Score Gauge
//!
//! Counts a displayed score up from 0 to its target over a fixed duration.
//! Unlike the typewriter, the gauge samples continuously: it asks its
//! [`FrameSource`](crate::timing::FrameSource) for the next refresh, computes
//! the value from elapsed time, and asks again until the duration is used
//! up. How many frames a run sees depends on the refresh rate; only the first
//! (0) and last (the target) values are fixed.
//!
//! ```text
//! value = floor(min(elapsed / duration, 1) · target)
//! ```

mod animator;
mod tier;

pub use animator::GaugeAnimator;
pub use tier::ScoreTier;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration of the trust score count-up
pub const DEFAULT_GAUGE_DURATION: Duration = Duration::from_millis(1200);

/// Snapshot of a gauge run, emitted on every sampled frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeFrame {
    /// Run this frame belongs to; bumps on every restart
    pub generation: u64,
    /// Value to display
    pub value: u8,
    /// Value the run converges to
    pub target: u8,
    /// Tier of `value`
    pub tier: ScoreTier,
    /// Whether `value` has reached `target`
    pub is_complete: bool,
}

impl Default for GaugeFrame {
    fn default() -> Self {
        Self {
            generation: 0,
            value: 0,
            target: 0,
            tier: ScoreTier::from_score(0),
            is_complete: false,
        }
    }
}
