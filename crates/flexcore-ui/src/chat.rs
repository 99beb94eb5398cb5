//! Transcript model.
//!
//! A [`Transcript`] is the ordered list of [`Message`]s exchanged in one page
//! session.  It always starts with the bot greeting and only grows by
//! appending; [`Transcript::clear`] resets it to the greeting alone.

use chrono::Local;
use serde::{Deserialize, Serialize};

use flexcore_intent::rules::GREETING;

/// A single entry in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub role: Role,
    /// Message body; bot messages may carry inline HTML.
    pub text: String,
    /// Local wall-clock time, `HH:MM`.
    pub timestamp: String,
}

/// Identifies the author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The site visitor.
    User,
    /// The assistant.
    Bot,
}

impl Role {
    /// Prefix used when the transcript is exported as plain text.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "FlexBot",
        }
    }
}

impl Message {
    /// Create a user message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: current_timestamp(),
        }
    }

    /// Create a bot message stamped now.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp: current_timestamp(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

fn current_timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Ordered, append-only conversation history.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript holding only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
        }
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Reset to the greeting alone.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
        if let Some(first) = self.messages.first_mut() {
            first.timestamp = current_timestamp();
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true; the greeting is always present.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether nothing has been said beyond the greeting.
    pub fn is_pristine(&self) -> bool {
        self.messages.len() == 1
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Count of messages written by `role`.
    pub fn count(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
