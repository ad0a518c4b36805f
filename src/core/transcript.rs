//! # Transcript
//!
//! The message view of the active conversation: either the welcome
//! placeholder with suggestion chips, or an ordered list of messages with
//! zero or more typing indicators at the tail.

use super::conversation::{Message, Role};

/// A canned prompt offered on the welcome placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub label: &'static str,
    pub message: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 3] = [
    Suggestion {
        label: "¿Cuáles son los productos más vendidos?",
        message: "¿Cuáles son los productos más vendidos?",
    },
    Suggestion {
        label: "Registrar una venta",
        message: "Registrar venta",
    },
    Suggestion {
        label: "¿Qué productos necesito reponer?",
        message: "¿Qué productos necesito reponer?",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptItem {
    Message(Message),
    Typing,
}

#[derive(Debug, Default)]
pub struct Transcript {
    items: Vec<TranscriptItem>,
    welcome: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.welcome = false;
    }

    /// Replace everything with the welcome placeholder.
    pub fn show_welcome(&mut self) {
        self.items.clear();
        self.welcome = true;
    }

    pub fn is_welcome(&self) -> bool {
        self.welcome
    }

    pub fn append(&mut self, message: Message) {
        self.welcome = false;
        self.items.push(TranscriptItem::Message(message));
    }

    pub fn append_text(&mut self, role: Role, text: impl Into<String>) {
        self.append(Message::now(role, text));
    }

    pub fn show_typing(&mut self) {
        self.welcome = false;
        self.items.push(TranscriptItem::Typing);
    }

    /// Remove the most recent typing indicator, if any.
    pub fn hide_typing(&mut self) {
        if let Some(index) = self.items.iter().rposition(|i| *i == TranscriptItem::Typing) {
            self.items.remove(index);
        }
    }

    pub fn items(&self) -> &[TranscriptItem] {
        &self.items
    }

    pub fn message_count(&self) -> usize {
        self.messages().count()
    }

    pub fn has_messages(&self) -> bool {
        self.messages().next().is_some()
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.items.iter().filter_map(|item| match item {
            TranscriptItem::Message(m) => Some(m),
            TranscriptItem::Typing => None,
        })
    }
}
