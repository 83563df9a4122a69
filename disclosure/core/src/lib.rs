//! Disclosure Core - Headless Progressive Disclosure for FinFund
//!
//! This crate holds the two timing engines behind FinFund's pitch coach and
//! trust score screens, completely independent of any UI framework:
//!
//! - [`Typewriter`]: reveals a pitch one character at a time on a fixed
//!   cadence after an optional start delay.
//! - [`GaugeAnimator`]: counts a score up from 0 to its target over a fixed
//!   duration by sampling refresh frames, and buckets the value into a
//!   [`ScoreTier`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Host Surfaces                          │
//! │   ┌──────────────┐   ┌────────────────┐   ┌───────────────┐   │
//! │   │ finfund-tui  │   │ tokio drivers  │   │  tests/fakes  │   │
//! │   │  (ratatui)   │   │   (host.rs)    │   │  (Manual*)    │   │
//! │   └──────┬───────┘   └───────┬────────┘   └───────┬───────┘   │
//! │          └──────────┬────────┴────────────────────┘           │
//! │             TimerId / FrameTick (up)                           │
//! │             RevealFrame / GaugeFrame (down)                    │
//! └─────────────────────┼──────────────────────────────────────────┘
//!                       │
//! ┌─────────────────────┼──────────────────────────────────────────┐
//! │                 DISCLOSURE CORE                                │
//! │   ┌────────────┐  ┌───────────────┐  ┌────────────────────┐    │
//! │   │ Typewriter │  │ GaugeAnimator │  │ Scheduler /        │    │
//! │   │            │  │  + ScoreTier  │  │ FrameSource / Clock│    │
//! │   └────────────┘  └───────────────┘  └────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Engines never read the wall clock and never sleep. Time reaches them only
//! through fired [`TimerId`]s and sampled [`FrameTick`]s, so a test can drive
//! a whole run with [`ManualScheduler`] and [`ManualFrameSource`].
//!
//! # Module Overview
//!
//! - [`timing`]: clocks, schedulers, frame sources, easing, shared phases
//! - [`reveal`]: the typewriter engine
//! - [`gauge`]: the score gauge engine and tier derivation
//! - [`host`]: tokio drivers publishing engine state on watch channels
//! - [`config`]: TOML + environment configuration for default timings
//! - [`state`]: explicit application state with pure transitions
//! - [`sensitive`]: banking keyword detector for the secure chat input
//! - [`error`]: crate error type

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod gauge;
pub mod host;
pub mod reveal;
pub mod sensitive;
pub mod state;
pub mod timing;

pub use error::{duration_from_millis, Error, Result};

pub use gauge::{GaugeAnimator, GaugeFrame, ScoreTier, DEFAULT_GAUGE_DURATION};
pub use reveal::{RevealFrame, RevealTiming, Typewriter};
pub use timing::{
    Clock, Easing, FrameId, FrameSource, FrameTick, IntervalFrameSource, ManualClock,
    ManualFrameSource, ManualScheduler, Phase, Scheduler, TimerId, TokioClock, TokioScheduler,
};

pub use host::{spawn_gauge, spawn_revealer, GaugeCommand, GaugeHandle, RevealCommand, RevealerHandle};

pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ConfigError,
    ConfigSource, DisclosureConfig, DisclosureToml,
};
pub use sensitive::{contains_sensitive, detect, SensitiveMatch};
pub use state::{AppAction, AppState, Language, Role, Sex, UserProfile};
