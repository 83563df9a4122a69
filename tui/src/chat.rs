//! Secure Chat Transcript
//!
//! A sent message joins the transcript at once and schedules the advisor's
//! canned acknowledgement. The reply is posted when its timer fires, in the
//! language that was active when the message was sent.
//!
//! The log is generic over [`Scheduler`] so tests can run it on virtual time;
//! the app uses a [`disclosure_core::TokioScheduler`].

use std::collections::HashMap;
use std::time::Duration;

use disclosure_core::{Language, Scheduler, TimerId};

/// Delay before the advisor's reply to each message
pub const AUTO_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Advisor,
}

/// One line of the transcript
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// The advisor's acknowledgement in `language`
pub fn auto_reply(language: Language) -> &'static str {
    match language {
        Language::En => "Thanks for sharing. I'll review this information and get back to you soon.",
        Language::Al => {
            "Faleminderit për ndarjen. Do ta shqyrtoj këtë informacion dhe do t'ju kthej përgjigje së shpejti."
        }
    }
}

/// Transcript plus the replies still waiting on their timers
#[derive(Debug)]
pub struct ChatLog<S> {
    scheduler: S,
    messages: Vec<ChatMessage>,
    replies: HashMap<TimerId, Language>,
}

impl<S: Scheduler> ChatLog<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            messages: Vec::new(),
            replies: HashMap::new(),
        }
    }

    /// Append `draft` as a user message and schedule the reply
    ///
    /// Blank drafts are ignored. Returns whether the message was sent.
    pub fn send(&mut self, draft: &str, language: Language) -> bool {
        if draft.trim().is_empty() {
            return false;
        }
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: draft.to_string(),
        });
        let id = self.scheduler.schedule_once(AUTO_REPLY_DELAY);
        self.replies.insert(id, language);
        true
    }

    /// Post the reply waiting on `id`
    ///
    /// Returns `false` for ids this log did not schedule.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        let Some(language) = self.replies.remove(&id) else {
            return false;
        };
        self.messages.push(ChatMessage {
            sender: Sender::Advisor,
            text: auto_reply(language).to_string(),
        });
        true
    }

    /// Transcript, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages the user has sent
    pub fn sent(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.sender == Sender::User)
            .count()
    }

    /// Replies not yet posted
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
