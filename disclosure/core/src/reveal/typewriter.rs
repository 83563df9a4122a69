//! Typewriter engine
//!
//! Owns at most one pending timer. Every restart cancels that timer at the
//! scheduler and bumps the generation; a fired id that is not the pending one
//! is dropped, so a timer from an abandoned run can never reveal a character
//! of the new text.

use tracing::{debug, trace};

use super::{RevealFrame, RevealTiming};
use crate::timing::{Phase, Scheduler, TimerId};

/// Character-by-character text revealer
#[derive(Debug, Default)]
pub struct Typewriter {
    /// Text of the current run
    source: String,
    /// Characters in `source`
    total: usize,
    /// Characters revealed so far
    revealed: usize,
    /// Byte offset of the end of the visible prefix
    visible_end: usize,
    timing: RevealTiming,
    phase: Phase,
    has_started: bool,
    generation: u64,
    pending: Option<TimerId>,
}

impl Typewriter {
    /// Create an idle typewriter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start revealing `text`
    ///
    /// Restarts from empty output when the text or the start delay differs
    /// from the active run, or when nothing is running. Supplying the same
    /// text and start delay again is a no-op, except that a changed
    /// character delay applies from the next scheduled step.
    ///
    /// Empty text completes immediately without scheduling anything.
    /// Returns the frame after the call.
    pub fn start<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        text: &str,
        timing: RevealTiming,
    ) -> RevealFrame {
        if self.phase != Phase::Idle
            && self.source == text
            && self.timing.start_delay == timing.start_delay
        {
            if self.timing.char_delay != timing.char_delay {
                trace!(
                    generation = self.generation,
                    char_delay_ms = timing.char_delay.as_millis(),
                    "Character delay changed mid-run"
                );
                self.timing.char_delay = timing.char_delay;
            }
            return self.frame();
        }

        self.cancel_pending(scheduler);
        self.generation += 1;
        self.source = text.to_owned();
        self.total = text.chars().count();
        self.revealed = 0;
        self.visible_end = 0;
        self.timing = timing;
        self.has_started = false;

        if self.total == 0 {
            self.phase = Phase::Complete;
            debug!(generation = self.generation, "Empty text, reveal complete");
            return self.frame();
        }

        self.phase = Phase::Waiting;
        self.pending = Some(scheduler.schedule_once(timing.start_delay));
        debug!(
            generation = self.generation,
            chars = self.total,
            start_delay_ms = timing.start_delay.as_millis(),
            char_delay_ms = timing.char_delay.as_millis(),
            "Typewriter run started"
        );
        self.frame()
    }

    /// Handle a fired timer
    ///
    /// Returns a frame when a character was revealed. The start-delay timer
    /// only arms the first reveal and yields `None`, as do stale ids.
    pub fn on_timer<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        id: TimerId,
    ) -> Option<RevealFrame> {
        if self.pending != Some(id) {
            trace!(timer = id.get(), "Ignoring stale typewriter timer");
            return None;
        }
        self.pending = None;

        match self.phase {
            Phase::Waiting => {
                self.has_started = true;
                self.phase = Phase::Running;
                self.pending = Some(scheduler.schedule_once(self.timing.char_delay));
                None
            }
            Phase::Running => {
                let next = self.source[self.visible_end..].chars().next()?;
                self.visible_end += next.len_utf8();
                self.revealed += 1;

                if self.revealed == self.total {
                    self.phase = Phase::Complete;
                    debug!(generation = self.generation, "Typewriter run complete");
                } else {
                    self.pending = Some(scheduler.schedule_once(self.timing.char_delay));
                }
                trace!(revealed = self.revealed, total = self.total, "Revealed character");
                Some(self.frame())
            }
            Phase::Idle | Phase::Complete => None,
        }
    }

    /// Abandon the current run and return to idle
    ///
    /// Cancels the pending timer and discards partial output.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.cancel_pending(scheduler);
        if self.phase != Phase::Idle {
            self.generation += 1;
            debug!(generation = self.generation, "Typewriter stopped");
        }
        self.source.clear();
        self.total = 0;
        self.revealed = 0;
        self.visible_end = 0;
        self.has_started = false;
        self.phase = Phase::Idle;
    }

    fn cancel_pending<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn frame(&self) -> RevealFrame {
        RevealFrame {
            generation: self.generation,
            visible_text: self.visible_text().to_owned(),
            revealed: self.revealed,
            total: self.total,
            is_complete: self.is_complete(),
        }
    }

    /// The revealed prefix of the text
    #[must_use]
    pub fn visible_text(&self) -> &str {
        &self.source[..self.visible_end]
    }

    /// The full text of the current run
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// Characters revealed so far
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Characters in the current text
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether the start delay has elapsed for this run
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Whether the whole text is visible
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

    /// Timing of the current run
    #[must_use]
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// The timer this engine is waiting on, if any
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }
}
