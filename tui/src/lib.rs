//! FinFund TUI - Terminal host for progressive disclosure
//!
//! A full-screen terminal surface binding the tokio drivers from
//! `disclosure-core` to a ratatui screen.
//!
//! # Architecture
//!
//! - **App**: event loop, driver handles, the idea and the chat draft
//! - **Chat**: secure chat transcript with scheduled advisor replies
//! - **View**: layout and rendering of the pitch, gauge and chat panes
//! - **Widgets**: word-wrapped text that follows its tail
//! - **Mock**: embedded demo idea, pitches and trust score

pub mod app;
pub mod chat;
pub mod mock;
pub mod theme;
pub mod view;
pub mod widgets;

pub use app::App;
