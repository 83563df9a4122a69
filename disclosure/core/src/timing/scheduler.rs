//! One-shot timer scheduling
//!
//! A scheduler hands out a [`TimerId`] per request and later reports that id
//! back to the host once the delay has elapsed. The host routes fired ids to
//! whichever engine owns them; engines drop ids they are no longer waiting
//! on, which is what makes a cancelled-but-already-fired timer harmless.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::clock::{Clock, ManualClock};

/// Handle for one scheduled wake-up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id (unique per scheduler)
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Capability to schedule one-shot timers
pub trait Scheduler {
    /// Arrange for `id` to fire once `delay` has elapsed
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

// ============================================================================
// Manual (virtual time)
// ============================================================================

/// Deterministic scheduler running on a [`ManualClock`]
///
/// Timers fire in deadline order; timers sharing a deadline fire in the
/// order they were scheduled.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    clock: ManualClock,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), TimerId>,
}

impl ManualScheduler {
    /// Create a scheduler with its own clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler sharing an existing clock
    #[must_use]
    pub fn with_clock(clock: ManualClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// The virtual clock this scheduler runs on
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Current virtual time
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Number of timers still waiting to fire
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the earliest pending timer
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Jump to the earliest deadline and fire that one timer
    ///
    /// This is how a punctual host behaves: each callback runs exactly at
    /// its deadline, and anything it schedules is relative to that instant.
    pub fn fire_next(&mut self) -> Option<TimerId> {
        let ((deadline, _), id) = self.queue.pop_first()?;
        self.clock.set(deadline);
        Some(id)
    }

    /// Advance time by `by` and fire every timer due by then
    ///
    /// Models a host that was busy and services several timers late in one
    /// batch. Timers scheduled while handling the batch are relative to the
    /// new "now".
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.clock.now().saturating_add(by);
        let mut fired = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > target {
                break;
            }
            fired.push(entry.remove());
        }
        self.clock.set(target);
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        let deadline = self.clock.now().saturating_add(delay);
        self.queue.insert((deadline, seq), id);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.retain(|_, pending| *pending != id);
    }
}

// ============================================================================
// Tokio
// ============================================================================

/// Scheduler backed by tokio timers
///
/// Each timer is a small task sleeping for its delay and then sending its id
/// on the channel returned by [`TokioScheduler::new`]. Cancelling aborts the
/// task. An id can still arrive after cancellation if the task had already
/// sent it; engines ignore such stale ids.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    fired_tx: mpsc::UnboundedSender<TimerId>,
    timers: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver on which fired ids arrive
    ///
    /// Must be used from within a tokio runtime.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            fired_tx,
            timers: HashMap::new(),
        };
        (scheduler, fired_rx)
    }

    /// Forget the task of a timer whose id has been received
    pub fn acknowledge(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    /// Number of timers not yet acknowledged or cancelled
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let fired_tx = self.fired_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owning driver stopped; nothing to do.
            let _ = fired_tx.send(id);
        });
        self.timers.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}
