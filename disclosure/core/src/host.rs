//! Tokio Drivers - Engines as Subscribable Background Tasks
//!
//! Each driver is one tokio task owning one engine and its production timing
//! capability. Hosts send commands over an mpsc channel and read state from a
//! `watch` channel: [`RevealerHandle::current`] polls, and
//! [`RevealerHandle::subscribe`] yields a receiver whose `changed()` resolves
//! on every published frame.
//!
//! ```text
//! host ──RevealCommand──▶ driver task ──RevealFrame──▶ watch ──▶ renderers
//!                          │    ▲
//!                 schedule │    │ fired TimerId
//!                          ▼    │
//!                       TokioScheduler
//! ```
//!
//! Within a task commands and timer callbacks interleave but never overlap,
//! so the engine needs no locking. Dropping the handle (or calling
//! `shutdown`) ends the task and aborts every pending timer.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Error, Result};
use crate::gauge::{GaugeAnimator, GaugeFrame};
use crate::reveal::{RevealFrame, RevealTiming, Typewriter};
use crate::timing::{IntervalFrameSource, TokioScheduler};

// ============================================================================
// Typewriter driver
// ============================================================================

/// Commands accepted by a revealer driver
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealCommand {
    /// Reveal `text` (absent text counts as empty)
    Start {
        /// Text to reveal
        text: Option<String>,
        /// Cadence of the run
        timing: RevealTiming,
    },
    /// Abandon the current run
    Stop,
}

/// Handle to a running typewriter driver
#[derive(Debug)]
pub struct RevealerHandle {
    commands: mpsc::UnboundedSender<RevealCommand>,
    state: watch::Receiver<RevealFrame>,
    task: JoinHandle<()>,
}

impl RevealerHandle {
    /// Reveal `text` with `timing`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn start(&self, text: impl Into<String>, timing: RevealTiming) -> Result<()> {
        self.send(RevealCommand::Start {
            text: Some(text.into()),
            timing,
        })
    }

    /// Abandon the current run
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn stop(&self) -> Result<()> {
        self.send(RevealCommand::Stop)
    }

    /// Send a raw command
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn send(&self, command: RevealCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::DriverClosed("revealer"))
    }

    /// Latest published frame
    #[must_use]
    pub fn current(&self) -> RevealFrame {
        self.state.borrow().clone()
    }

    /// New receiver for published frames
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RevealFrame> {
        self.state.clone()
    }

    /// Stop the driver and wait for it to finish
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        // A panicked or aborted driver has nothing left to clean up.
        let _ = task.await;
    }
}

/// Spawn a typewriter driver on the current tokio runtime
#[must_use]
pub fn spawn_revealer() -> RevealerHandle {
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let (state_tx, state) = watch::channel(RevealFrame::default());

    let task = tokio::spawn(async move {
        let (mut scheduler, mut fired) = TokioScheduler::new();
        let mut typewriter = Typewriter::new();

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(RevealCommand::Start { text, timing }) => {
                        let text = text.unwrap_or_default();
                        let frame = typewriter.start(&mut scheduler, &text, timing);
                        state_tx.send_replace(frame);
                    }
                    Some(RevealCommand::Stop) => {
                        typewriter.stop(&mut scheduler);
                        state_tx.send_replace(typewriter.frame());
                    }
                    None => break,
                },
                Some(id) = fired.recv() => {
                    scheduler.acknowledge(id);
                    if let Some(frame) = typewriter.on_timer(&mut scheduler, id) {
                        state_tx.send_replace(frame);
                    }
                }
            }
        }

        typewriter.stop(&mut scheduler);
        debug!("Revealer driver stopped");
    });

    RevealerHandle {
        commands,
        state,
        task,
    }
}

// ============================================================================
// Gauge driver
// ============================================================================

/// Commands accepted by a gauge driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaugeCommand {
    /// Animate to `target` over `duration`
    Animate {
        /// Score to count up to
        target: u8,
        /// Length of the count-up
        duration: Duration,
    },
    /// Abandon the current run
    Stop,
}

/// Handle to a running gauge driver
#[derive(Debug)]
pub struct GaugeHandle {
    commands: mpsc::UnboundedSender<GaugeCommand>,
    state: watch::Receiver<GaugeFrame>,
    task: JoinHandle<()>,
}

impl GaugeHandle {
    /// Animate to `target` over `duration`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn animate(&self, target: u8, duration: Duration) -> Result<()> {
        self.send(GaugeCommand::Animate { target, duration })
    }

    /// Abandon the current run
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn stop(&self) -> Result<()> {
        self.send(GaugeCommand::Stop)
    }

    /// Send a raw command
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver task has stopped.
    pub fn send(&self, command: GaugeCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| Error::DriverClosed("gauge"))
    }

    /// Latest published frame
    #[must_use]
    pub fn current(&self) -> GaugeFrame {
        *self.state.borrow()
    }

    /// New receiver for published frames
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GaugeFrame> {
        self.state.clone()
    }

    /// Stop the driver and wait for it to finish
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        let _ = task.await;
    }
}

/// Spawn a gauge driver sampling at `refresh_rate_hz`
#[must_use]
pub fn spawn_gauge(refresh_rate_hz: u32) -> GaugeHandle {
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let (state_tx, state) = watch::channel(GaugeFrame::default());

    let task = tokio::spawn(async move {
        let mut frames = IntervalFrameSource::new(refresh_rate_hz);
        let mut gauge = GaugeAnimator::new();

        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(GaugeCommand::Animate { target, duration }) => {
                        let frame = gauge.animate(&mut frames, target, duration);
                        state_tx.send_replace(frame);
                    }
                    Some(GaugeCommand::Stop) => {
                        gauge.stop(&mut frames);
                        state_tx.send_replace(gauge.frame());
                    }
                    None => break,
                },
                ticks = frames.next_refresh(), if frames.has_pending() => {
                    for tick in ticks {
                        if let Some(frame) = gauge.on_frame(&mut frames, tick) {
                            state_tx.send_replace(frame);
                        }
                    }
                }
            }
        }

        gauge.stop(&mut frames);
        debug!("Gauge driver stopped");
    });

    GaugeHandle {
        commands,
        state,
        task,
    }
}
