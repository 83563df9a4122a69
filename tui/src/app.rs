//! Main Application
//!
//! The App struct is a thin host around two disclosure drivers:
//! - Event loop (keyboard, resize) over crossterm's `EventStream`
//! - A typewriter driver revealing the generated pitch, gated on the idea
//!   being long enough
//! - A gauge driver counting up the founder's trust score
//! - The secure chat transcript with the sensitive-info check and the
//!   advisor's delayed replies
//!
//! The loop never polls on a timer. It wakes on terminal events, on frames
//! published by the drivers and on fired reply timers, then redraws.

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use disclosure_core::{
    sensitive, spawn_gauge, spawn_revealer, AppAction, AppState, DisclosureConfig, GaugeFrame,
    GaugeHandle, RevealFrame, RevealerHandle, Role, TimerId, TokioScheduler,
};

use crate::chat::{ChatLog, ChatMessage};
use crate::mock::MockData;
use crate::view;

/// Which input receives typed characters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Chat,
    Idea,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Shared application state
    state: AppState,
    /// Timings from config
    config: DisclosureConfig,
    /// Embedded demo content
    mock: MockData,

    // === Drivers ===
    revealer: RevealerHandle,
    gauge: GaugeHandle,

    // === Latest Frames ===
    reveal: RevealFrame,
    score: GaugeFrame,
    /// Generation the stored pitch must come after
    pitch_after: u64,

    // === Input State ===
    focus: Focus,
    /// Secure chat draft
    chat_input: String,

    // === Chat ===
    chat: ChatLog<TokioScheduler>,
    /// Reply timers fired by the chat scheduler
    replies: mpsc::UnboundedReceiver<TimerId>,
}

impl App {
    /// Create the app and start the first pitch and gauge runs
    ///
    /// The terminal surface is the founder's view, seeded with the demo idea.
    /// Must be called from within a tokio runtime.
    pub fn new(config: DisclosureConfig, mock: MockData) -> anyhow::Result<Self> {
        let state = AppState::new()
            .apply(AppAction::SetRole(Role::Founder))
            .apply(AppAction::SetIdea(mock.idea.clone()));
        let revealer = spawn_revealer();
        let gauge = spawn_gauge(config.refresh_rate_hz);
        let (scheduler, replies) = TokioScheduler::new();

        let mut app = Self {
            running: true,
            state,
            config,
            mock,
            revealer,
            gauge,
            reveal: RevealFrame::default(),
            score: GaugeFrame::default(),
            pitch_after: 0,
            focus: Focus::default(),
            chat_input: String::new(),
            chat: ChatLog::new(scheduler),
            replies,
        };
        app.replay()?;
        Ok(app)
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut events = EventStream::new();
        let mut reveal_rx = self.revealer.subscribe();
        let mut gauge_rx = self.gauge.subscribe();

        terminal.draw(|frame| view::draw(frame, self))?;

        while self.running {
            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                    None => self.running = false,
                },
                Ok(()) = reveal_rx.changed() => {
                    reveal_rx.borrow_and_update();
                }
                Ok(()) = gauge_rx.changed() => {
                    gauge_rx.borrow_and_update();
                }
                Some(id) = self.replies.recv() => self.on_reply_timer(id),
            }

            self.sync();
            terminal.draw(|frame| view::draw(frame, self))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            KeyCode::Char('r') if ctrl => self.replay()?,
            KeyCode::Char('l') if ctrl => self.toggle_language()?,

            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Chat => Focus::Idea,
                    Focus::Idea => Focus::Chat,
                };
            }

            // Typing
            KeyCode::Char(c) if !ctrl => match self.focus {
                Focus::Chat => self.chat_input.push(c),
                Focus::Idea => {
                    let mut idea = self.state.idea.clone();
                    idea.push(c);
                    self.set_idea(idea);
                }
            },
            KeyCode::Backspace => match self.focus {
                Focus::Chat => {
                    self.chat_input.pop();
                }
                Focus::Idea => {
                    let mut idea = self.state.idea.clone();
                    idea.pop();
                    self.set_idea(idea);
                }
            },
            KeyCode::Enter => match self.focus {
                Focus::Chat => self.send_chat(),
                Focus::Idea => self.generate_pitch()?,
            },

            _ => {}
        }
        Ok(())
    }

    /// Restart both runs from the beginning
    ///
    /// Drivers ignore a start with unchanged parameters, so each is stopped
    /// first.
    pub fn replay(&mut self) -> anyhow::Result<()> {
        self.generate_pitch()?;

        self.gauge.stop()?;
        self.gauge
            .animate(self.mock.trust_score, self.config.gauge_duration)?;

        tracing::debug!(language = self.state.language.code(), "Replaying pitch and gauge");
        Ok(())
    }

    /// Switch language and retype the pitch in it
    pub fn toggle_language(&mut self) -> anyhow::Result<()> {
        self.state = std::mem::take(&mut self.state).apply(AppAction::ToggleLanguage);
        self.generate_pitch()
    }

    /// Type out a fresh pitch, or clear it if the idea is too short
    ///
    /// Completed reveals from before this call are never stored as the pitch.
    pub fn generate_pitch(&mut self) -> anyhow::Result<()> {
        self.state = std::mem::take(&mut self.state).apply(AppAction::SetPitch(String::new()));
        self.pitch_after = self.revealer.current().generation;
        self.revealer.stop()?;

        if !self.state.can_generate_pitch() {
            tracing::debug!(
                needed = self.state.idea_chars_needed(),
                "Idea too short to generate a pitch"
            );
            return Ok(());
        }
        self.revealer
            .start(self.mock.pitch(self.state.language), self.config.reveal)?;
        Ok(())
    }

    fn set_idea(&mut self, idea: String) {
        self.state = std::mem::take(&mut self.state).apply(AppAction::SetIdea(idea));
    }

    fn send_chat(&mut self) {
        if !self.chat.send(&self.chat_input, self.state.language) {
            return;
        }
        let message = std::mem::take(&mut self.chat_input);
        tracing::info!(
            chars = message.chars().count(),
            sensitive = sensitive::contains_sensitive(&message),
            "Chat message sent"
        );
    }

    fn on_reply_timer(&mut self, id: TimerId) {
        self.chat.scheduler_mut().acknowledge(id);
        if self.chat.on_timer(id) {
            tracing::debug!("Advisor reply posted");
        }
    }

    /// Pull the latest frames from the drivers and post fired replies
    ///
    /// A completed reveal is stored as the pitch only if it belongs to a run
    /// started after the last replay or language switch.
    pub fn sync(&mut self) {
        while let Ok(id) = self.replies.try_recv() {
            self.on_reply_timer(id);
        }
        self.reveal = self.revealer.current();
        self.score = self.gauge.current();

        if self.reveal.is_complete
            && self.reveal.total > 0
            && self.reveal.generation > self.pitch_after
            && self.state.pitch.is_empty()
        {
            let pitch = self.reveal.visible_text.clone();
            self.state = std::mem::take(&mut self.state).apply(AppAction::SetPitch(pitch));
            tracing::debug!("Pitch reveal complete");
        }
    }

    /// Stop both drivers and wait for them to finish
    pub async fn shutdown(self) {
        self.revealer.shutdown().await;
        self.gauge.shutdown().await;
    }

    // === Accessors for rendering ===

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Shared application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Latest typewriter frame
    pub fn reveal(&self) -> &RevealFrame {
        &self.reveal
    }

    /// Latest gauge frame
    pub fn score(&self) -> GaugeFrame {
        self.score
    }

    /// Input receiving typed characters
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Current chat draft
    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    /// Chat transcript, oldest first
    pub fn chat_messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    /// Messages sent this session
    pub fn sent(&self) -> usize {
        self.chat.sent()
    }

    /// Localised warning when the draft mentions banking details
    pub fn chat_warning(&self) -> Option<&'static str> {
        sensitive::contains_sensitive(&self.chat_input)
            .then_some(sensitive::warning(self.state.language))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use disclosure_core::{Language, RevealTiming};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chat::{auto_reply, Sender, AUTO_REPLY_DELAY};

    fn config() -> DisclosureConfig {
        let mut config = DisclosureConfig::new();
        config.reveal = RevealTiming::new(Duration::from_millis(1), Duration::from_millis(5));
        config.gauge_duration = Duration::from_millis(200);
        config
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Let paused time run every driver to completion, then sync
    async fn settle(app: &mut App) {
        tokio::time::sleep(Duration::from_secs(5)).await;
        app.sync();
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_complete_and_store_pitch() {
        let mock = MockData::embedded().unwrap();
        let expected = mock.pitch(Language::En).to_string();
        let mut app = App::new(config(), mock).unwrap();

        settle(&mut app).await;

        assert!(app.reveal().is_complete);
        assert_eq!(app.reveal().visible_text, expected);
        assert_eq!(app.state().pitch, expected);
        assert_eq!(app.score().value, 91);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_language_retypes_pitch() {
        let mock = MockData::embedded().unwrap();
        let albanian = mock.pitch(Language::Al).to_string();
        let mut app = App::new(config(), mock).unwrap();
        settle(&mut app).await;

        app.handle_key(ctrl('l')).unwrap();
        app.sync();
        assert_eq!(app.state().language, Language::Al);
        assert!(app.state().pitch.is_empty());

        settle(&mut app).await;
        assert_eq!(app.reveal().visible_text, albanian);
        assert_eq!(app.state().pitch, albanian);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_restarts_finished_runs() {
        let mut app = App::new(config(), MockData::embedded().unwrap()).unwrap();
        settle(&mut app).await;
        let first = app.reveal().generation;

        app.handle_key(ctrl('r')).unwrap();
        assert!(app.state().pitch.is_empty());
        tokio::time::sleep(Duration::from_millis(1)).await;
        app.sync();
        assert!(!app.reveal().is_complete);
        assert!(app.state().pitch.is_empty());

        settle(&mut app).await;
        assert!(app.reveal().generation > first);
        assert!(app.reveal().is_complete);
        assert_eq!(app.score().value, 91);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_input_and_warning() {
        let mut app = App::new(config(), MockData::embedded().unwrap()).unwrap();

        for c in "my iban".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.chat_input(), "my iban");
        assert_eq!(app.chat_warning(), Some(sensitive::warning(Language::En)));

        for _ in 0..4 {
            app.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        assert_eq!(app.chat_input(), "my ");
        assert_eq!(app.chat_warning(), None);

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.chat_input(), "");
        assert_eq!(app.sent(), 1);

        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.sent(), 1);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_draft_is_not_sent() {
        let mut app = App::new(config(), MockData::embedded().unwrap()).unwrap();
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.sent(), 0);
        assert!(app.chat_messages().is_empty());
        assert_eq!(app.chat_input(), "   ");

        settle(&mut app).await;
        assert!(app.chat_messages().is_empty());
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sent_message_gets_reply_in_language() {
        let mut app = App::new(config(), MockData::embedded().unwrap()).unwrap();
        app.handle_key(ctrl('l')).unwrap();
        for c in "tung".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.sent(), 1);
        assert_eq!(app.chat_messages().len(), 1);
        assert_eq!(app.chat_messages()[0].sender, Sender::User);
        assert_eq!(app.chat_messages()[0].text, "tung");

        tokio::time::sleep(AUTO_REPLY_DELAY - Duration::from_millis(100)).await;
        app.sync();
        assert_eq!(app.chat_messages().len(), 1);

        // Switching back does not change the language of the pending reply
        app.handle_key(ctrl('l')).unwrap();
        settle(&mut app).await;
        assert_eq!(app.chat_messages().len(), 2);
        assert_eq!(app.chat_messages()[1].sender, Sender::Advisor);
        assert_eq!(app.chat_messages()[1].text, auto_reply(Language::Al));
        assert_eq!(app.sent(), 1);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_as_founder_with_demo_idea() {
        let mock = MockData::embedded().unwrap();
        let idea = mock.idea.clone();
        let app = App::new(config(), mock).unwrap();

        assert_eq!(app.state().role, Some(Role::Founder));
        assert_eq!(app.state().idea, idea);
        assert!(app.state().women_in_business_eligible());
        assert_eq!(app.focus(), Focus::Chat);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_idea_blocks_pitch() {
        let mock = MockData::embedded().unwrap();
        let expected = mock.pitch(Language::En).to_string();
        let idea_len = mock.idea.chars().count();
        let mut app = App::new(config(), mock).unwrap();

        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus(), Focus::Idea);
        for _ in 0..idea_len {
            app.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        for c in "Solar kiosks".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.state().idea, "Solar kiosks");
        assert_eq!(app.state().idea_chars_needed(), 8);
        assert_eq!(app.chat_input(), "");

        app.handle_key(key(KeyCode::Enter)).unwrap();
        settle(&mut app).await;
        assert_eq!(app.reveal().revealed, 0);
        assert!(!app.reveal().is_complete);
        assert!(app.state().pitch.is_empty());

        for c in " for rural cafés".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        assert!(app.state().can_generate_pitch());
        app.handle_key(key(KeyCode::Enter)).unwrap();
        settle(&mut app).await;
        assert_eq!(app.state().pitch, expected);
        assert_eq!(app.sent(), 0);
        app.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys() {
        let mut app = App::new(config(), MockData::embedded().unwrap()).unwrap();
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.is_running());

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!app.is_running());
        app.shutdown().await;
    }
}
