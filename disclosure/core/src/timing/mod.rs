//! Timing Capabilities - Clocks, Schedulers and Frame Sources
//!
//! The engines in this crate never read the wall clock and never sleep.
//! Hosts inject time through two capabilities:
//!
//! - [`Scheduler`]: one-shot timers (the typewriter's cadence)
//! - [`FrameSource`]: "call me on the next refresh" requests (the gauge's
//!   continuous sampling)
//!
//! Each capability comes in a production flavour bound to tokio and a manual
//! flavour for deterministic tests.
//!
//! ```text
//! Scheduler    ── ManualScheduler   (advance / fire_next)
//!              └─ TokioScheduler    (tokio::time::sleep per timer)
//! FrameSource  ── ManualFrameSource (tick / step)
//!              └─ IntervalFrameSource (tokio interval at refresh rate)
//! ```

mod clock;
mod easing;
mod frame_source;
mod scheduler;

pub use clock::{Clock, ManualClock, TokioClock};
pub use easing::Easing;
pub use frame_source::{FrameId, FrameSource, FrameTick, IntervalFrameSource, ManualFrameSource};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, TokioScheduler};

use serde::{Deserialize, Serialize};

/// Lifecycle phase shared by both engines
///
/// ```text
/// Idle ──start──▶ Waiting ──first callback──▶ Running ──last step──▶ Complete
///   ▲                │                           │                     │
///   └────stop────────┴───────── restart (new parameters) ──────────────┘
/// ```
///
/// Empty text and zero-duration gauges go straight from a restart to
/// `Complete`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing has been started, or the run was stopped
    #[default]
    Idle,
    /// Waiting for the first callback (start delay or first frame)
    Waiting,
    /// Emitting values
    Running,
    /// Target reached; terminal until new parameters arrive
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_defaults_to_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
