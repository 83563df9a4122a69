//! Typewriter Reveal
//!
//! Reveals a string one character at a time: after `start_delay` the run
//! starts, and every `char_delay` thereafter exactly one more character
//! becomes visible until the whole text is shown.
//!
//! ```text
//! start("Hi!")   t=0            visible ""     Waiting
//!                t=start        (started)      Running
//!                t=start+1·d    visible "H"
//!                t=start+2·d    visible "Hi"
//!                t=start+3·d    visible "Hi!"  Complete
//! ```
//!
//! Characters are Unicode scalar values. A late host never causes skipped
//! or doubled characters: each fired timer reveals at most one character,
//! so the cadence is a lower bound rather than a guarantee.

mod typewriter;

pub use typewriter::Typewriter;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{duration_from_millis, Result};

/// Cadence of one typewriter run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Interval between successive characters
    pub char_delay: Duration,
    /// One-time wait before the run starts
    pub start_delay: Duration,
}

impl RevealTiming {
    /// Character interval used when none is given
    pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(40);

    /// Create a timing from durations
    #[must_use]
    pub const fn new(char_delay: Duration, start_delay: Duration) -> Self {
        Self {
            char_delay,
            start_delay,
        }
    }

    /// Cadence of the pitch coach: 20ms per character after a 300ms pause
    #[must_use]
    pub const fn pitch_coach() -> Self {
        Self::new(Duration::from_millis(20), Duration::from_millis(300))
    }

    /// Create a timing from host-supplied millisecond values
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if either value is negative
    /// or not finite.
    pub fn from_millis(char_delay_ms: f64, start_delay_ms: f64) -> Result<Self> {
        Ok(Self {
            char_delay: duration_from_millis("char_delay_ms", char_delay_ms)?,
            start_delay: duration_from_millis("start_delay_ms", start_delay_ms)?,
        })
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHAR_DELAY, Duration::ZERO)
    }
}

/// Snapshot of a typewriter run, emitted after every reveal
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealFrame {
    /// Run this frame belongs to; bumps on every restart
    pub generation: u64,
    /// The revealed prefix of the source text
    pub visible_text: String,
    /// Characters revealed so far
    pub revealed: usize,
    /// Characters in the source text
    pub total: usize,
    /// Whether the whole text is visible
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = RevealTiming::default();
        assert_eq!(timing.char_delay, Duration::from_millis(40));
        assert_eq!(timing.start_delay, Duration::ZERO);
    }

    #[test]
    fn test_from_millis_validates() {
        assert_eq!(
            RevealTiming::from_millis(20.0, 300.0).unwrap(),
            RevealTiming::pitch_coach()
        );
        assert!(RevealTiming::from_millis(-5.0, 0.0).is_err());
        assert!(RevealTiming::from_millis(5.0, -0.1).is_err());
        assert!(RevealTiming::from_millis(1e23, 0.0).is_err());
        assert!(RevealTiming::from_millis(0.0, 1e23).is_err());
    }
}
