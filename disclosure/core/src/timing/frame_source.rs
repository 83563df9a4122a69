//! Refresh-driven frame sources
//!
//! A frame source services "call me on the next refresh" requests, the way a
//! display's refresh callback does. Every request is serviced at most once;
//! an engine that wants to keep sampling asks again from inside its handler.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

use super::clock::{Clock, ManualClock, TokioClock};

/// Handle for one outstanding frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Raw numeric id (unique per frame source)
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A serviced frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    /// The request being serviced
    pub id: FrameId,
    /// Refresh time on the source's clock
    pub timestamp: Duration,
}

/// Capability to request refresh callbacks
pub trait FrameSource {
    /// Ask to be called back on the next refresh
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request. Unknown or already serviced ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Shared bookkeeping for outstanding requests
#[derive(Debug, Default)]
struct Requests {
    next_id: u64,
    pending: Vec<FrameId>,
}

impl Requests {
    fn request(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.pending.push(id);
        id
    }

    fn cancel(&mut self, id: FrameId) {
        self.pending.retain(|pending| *pending != id);
    }

    fn service(&mut self, timestamp: Duration) -> Vec<FrameTick> {
        self.pending
            .drain(..)
            .map(|id| FrameTick { id, timestamp })
            .collect()
    }
}

// ============================================================================
// Manual
// ============================================================================

/// Manually stepped frame source for tests
#[derive(Debug, Default)]
pub struct ManualFrameSource {
    clock: ManualClock,
    requests: Requests,
}

impl ManualFrameSource {
    /// Create a frame source with its own clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame source sharing an existing clock
    #[must_use]
    pub fn with_clock(clock: ManualClock) -> Self {
        Self {
            clock,
            requests: Requests::default(),
        }
    }

    /// The clock used to stamp ticks
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Number of requests waiting for the next refresh
    #[must_use]
    pub fn pending(&self) -> usize {
        self.requests.pending.len()
    }

    /// Service every outstanding request at the current time
    pub fn step(&mut self) -> Vec<FrameTick> {
        self.requests.service(self.clock.now())
    }

    /// Advance the clock by `by`, then service outstanding requests
    pub fn tick(&mut self, by: Duration) -> Vec<FrameTick> {
        self.clock.advance(by);
        self.step()
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&mut self) -> FrameId {
        self.requests.request()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.requests.cancel(id);
    }
}

// ============================================================================
// Tokio interval
// ============================================================================

/// Frame source refreshing on a tokio interval
///
/// The host awaits [`IntervalFrameSource::next_refresh`] while
/// [`IntervalFrameSource::has_pending`] is true. Missed refreshes are skipped
/// rather than replayed, like a display dropping frames.
#[derive(Debug)]
pub struct IntervalFrameSource {
    clock: TokioClock,
    interval: Interval,
    requests: Requests,
}

impl IntervalFrameSource {
    /// Create a frame source refreshing `refresh_rate_hz` times per second
    ///
    /// The rate is clamped to `1..=1000` Hz. Must be called from within a
    /// tokio runtime.
    #[must_use]
    pub fn new(refresh_rate_hz: u32) -> Self {
        let period = Duration::from_secs(1) / refresh_rate_hz.clamp(1, 1000);
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            clock: TokioClock::new(),
            interval,
            requests: Requests::default(),
        }
    }

    /// Whether any request is waiting for a refresh
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.requests.pending.is_empty()
    }

    /// Wait for the next refresh and service outstanding requests
    ///
    /// Cancel safe: dropping the future before it completes services nothing.
    pub async fn next_refresh(&mut self) -> Vec<FrameTick> {
        self.interval.tick().await;
        self.requests.service(self.clock.now())
    }
}

impl FrameSource for IntervalFrameSource {
    fn request_frame(&mut self) -> FrameId {
        self.requests.request()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.requests.cancel(id);
    }
}
