//! Gauge engine
//!
//! The run's origin is the timestamp of its first sampled frame, not the
//! moment `animate` was called, so the first emitted value is always 0.

use std::time::Duration;

use tracing::{debug, trace};

use super::{GaugeFrame, ScoreTier, DEFAULT_GAUGE_DURATION};
use crate::timing::{FrameId, FrameSource, FrameTick, Phase};

/// Animated score gauge
#[derive(Debug)]
pub struct GaugeAnimator {
    target: u8,
    duration: Duration,
    value: u8,
    /// Timestamp of the run's first frame
    origin: Option<Duration>,
    phase: Phase,
    generation: u64,
    pending: Option<FrameId>,
}

impl Default for GaugeAnimator {
    fn default() -> Self {
        Self {
            target: 0,
            duration: DEFAULT_GAUGE_DURATION,
            value: 0,
            origin: None,
            phase: Phase::Idle,
            generation: 0,
            pending: None,
        }
    }
}

impl GaugeAnimator {
    /// Create an idle gauge showing 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate from 0 to `target` over `duration`
    ///
    /// Cancels any frame request of the previous run before starting. Calling
    /// again with the same target and duration while a run exists is a no-op.
    /// A zero duration shows the target immediately and requests no frames.
    /// Returns the frame after the call.
    pub fn animate<F: FrameSource + ?Sized>(
        &mut self,
        frames: &mut F,
        target: u8,
        duration: Duration,
    ) -> GaugeFrame {
        if self.phase != Phase::Idle && self.target == target && self.duration == duration {
            return self.frame();
        }

        self.cancel_pending(frames);
        self.generation += 1;
        self.target = target;
        self.duration = duration;
        self.value = 0;
        self.origin = None;

        if duration.is_zero() {
            self.value = target;
            self.phase = Phase::Complete;
            debug!(generation = self.generation, target, "Zero duration, gauge complete");
            return self.frame();
        }

        self.phase = Phase::Waiting;
        self.pending = Some(frames.request_frame());
        debug!(
            generation = self.generation,
            target,
            duration_ms = duration.as_millis(),
            "Gauge run started"
        );
        self.frame()
    }

    /// Handle a serviced frame request
    ///
    /// Returns the sampled frame, or `None` for a tick this run is not
    /// waiting on.
    pub fn on_frame<F: FrameSource + ?Sized>(
        &mut self,
        frames: &mut F,
        tick: FrameTick,
    ) -> Option<GaugeFrame> {
        if self.pending != Some(tick.id) {
            trace!(frame = tick.id.get(), "Ignoring stale gauge frame");
            return None;
        }
        self.pending = None;

        let origin = *self.origin.get_or_insert(tick.timestamp);
        self.phase = Phase::Running;

        let elapsed = tick.timestamp.saturating_sub(origin);
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);

        if progress >= 1.0 {
            self.value = self.target;
            self.phase = Phase::Complete;
            debug!(generation = self.generation, value = self.value, "Gauge run complete");
        } else {
            // A source whose clock stutters backwards must not pull the value down.
            self.value = self.value.max(sample(progress, self.target));
            self.pending = Some(frames.request_frame());
            trace!(value = self.value, progress, "Gauge sampled");
        }

        Some(self.frame())
    }

    /// Abandon the current run and return to idle at 0
    pub fn stop<F: FrameSource + ?Sized>(&mut self, frames: &mut F) {
        self.cancel_pending(frames);
        if self.phase != Phase::Idle {
            self.generation += 1;
            debug!(generation = self.generation, "Gauge stopped");
        }
        self.value = 0;
        self.origin = None;
        self.phase = Phase::Idle;
    }

    fn cancel_pending<F: FrameSource + ?Sized>(&mut self, frames: &mut F) {
        if let Some(id) = self.pending.take() {
            frames.cancel_frame(id);
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn frame(&self) -> GaugeFrame {
        GaugeFrame {
            generation: self.generation,
            value: self.value,
            target: self.target,
            tier: self.tier(),
            is_complete: self.is_complete(),
        }
    }

    /// Value to display
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Value the run converges to
    #[must_use]
    pub fn target(&self) -> u8 {
        self.target
    }

    /// Duration of the current run
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Tier of the displayed value
    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.value)
    }

    /// Whether the target has been reached
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current run generation
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The frame request this engine is waiting on, if any
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }
}

/// `floor(progress · target)` for progress in `[0, 1)`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample(progress: f64, target: u8) -> u8 {
    (progress * f64::from(target)).floor().clamp(0.0, f64::from(target)) as u8
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timing::{Clock, ManualFrameSource};

    const FRAME: Duration = Duration::from_millis(16);

    /// Step frames until the gauge stops requesting, collecting values
    fn run_to_end(gauge: &mut GaugeAnimator, frames: &mut ManualFrameSource, step: Duration) -> Vec<u8> {
        let mut values = Vec::new();
        while frames.pending() > 0 {
            for tick in frames.tick(step) {
                if let Some(frame) = gauge.on_frame(frames, tick) {
                    values.push(frame.value);
                }
            }
        }
        values
    }

    #[test]
    fn test_counts_up_to_target() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();

        let start = gauge.animate(&mut frames, 91, Duration::from_millis(1200));
        assert_eq!(start.value, 0);
        assert_eq!(gauge.phase(), Phase::Waiting);

        let values = run_to_end(&mut gauge, &mut frames, FRAME);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&91));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| *v <= 91));
        assert!(gauge.is_complete());
        assert_eq!(gauge.tier(), ScoreTier::Success);
    }

    #[test]
    fn test_linear_progress() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 100, Duration::from_millis(1000));

        let first = frames.tick(FRAME)[0];
        assert_eq!(gauge.on_frame(&mut frames, first).unwrap().value, 0);

        let half = frames.tick(Duration::from_millis(500))[0];
        let frame = gauge.on_frame(&mut frames, half).unwrap();
        assert_eq!(frame.value, 50);
        assert_eq!(frame.tier, ScoreTier::Warning);
        assert!(!frame.is_complete);

        let end = frames.tick(Duration::from_millis(700))[0];
        let frame = gauge.on_frame(&mut frames, end).unwrap();
        assert_eq!(frame.value, 100);
        assert!(frame.is_complete);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_zero_duration_completes_without_frames() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();

        let frame = gauge.animate(&mut frames, 73, Duration::ZERO);
        assert_eq!(frame.value, 73);
        assert!(frame.is_complete);
        assert_eq!(frame.tier, ScoreTier::Primary);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_zero_target() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 0, Duration::from_millis(100));

        let values = run_to_end(&mut gauge, &mut frames, FRAME);
        assert!(values.iter().all(|v| *v == 0));
        assert!(gauge.is_complete());
    }

    #[test]
    fn test_coarse_refresh_still_converges() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 64, Duration::from_millis(1200));

        let values = run_to_end(&mut gauge, &mut frames, Duration::from_secs(1));
        assert_eq!(values, vec![0, 53, 64]);
    }

    #[test]
    fn test_restart_mid_flight_drops_old_run() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 95, Duration::from_millis(1000));

        for tick in frames.tick(FRAME) {
            gauge.on_frame(&mut frames, tick);
        }
        for tick in frames.tick(Duration::from_millis(500)) {
            gauge.on_frame(&mut frames, tick);
        }
        assert_eq!(gauge.value(), 47);
        let stale = gauge.pending_frame().unwrap();

        let frame = gauge.animate(&mut frames, 40, Duration::from_millis(500));
        assert_eq!(frame.value, 0);
        assert_eq!(frame.generation, 2);
        assert_eq!(frames.pending(), 1);

        let stale_tick = FrameTick {
            id: stale,
            timestamp: frames.clock().now(),
        };
        assert_eq!(gauge.on_frame(&mut frames, stale_tick), None);

        let values = run_to_end(&mut gauge, &mut frames, FRAME);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&40));
        assert!(values.iter().all(|v| *v <= 40));
    }

    #[test]
    fn test_same_parameters_do_not_restart() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 80, Duration::from_millis(100));
        let pending = gauge.pending_frame();

        let frame = gauge.animate(&mut frames, 80, Duration::from_millis(100));
        assert_eq!(frame.generation, 1);
        assert_eq!(gauge.pending_frame(), pending);
    }

    #[test]
    fn test_backwards_timestamp_never_decreases_value() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 100, Duration::from_millis(1000));

        let first = frames.tick(Duration::from_millis(100))[0];
        gauge.on_frame(&mut frames, first);
        let next = frames.tick(Duration::from_millis(500))[0];
        assert_eq!(gauge.on_frame(&mut frames, next).unwrap().value, 50);

        let id = gauge.pending_frame().unwrap();
        let rewound = FrameTick {
            id,
            timestamp: Duration::from_millis(300),
        };
        assert_eq!(gauge.on_frame(&mut frames, rewound).unwrap().value, 50);
    }

    #[test]
    fn test_stop_resets_to_zero() {
        let mut frames = ManualFrameSource::new();
        let mut gauge = GaugeAnimator::new();
        gauge.animate(&mut frames, 90, Duration::from_millis(100));
        gauge.stop(&mut frames);

        assert_eq!(gauge.phase(), Phase::Idle);
        assert_eq!(gauge.value(), 0);
        assert_eq!(frames.pending(), 0);
    }
}
