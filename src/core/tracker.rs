//! # Conversation Tracker
//!
//! Remembers which conversations are known to hold at least one message and
//! decides when the current conversation is empty and should be discarded.
//!
//! A conversation id is in the set iff the client has observed at least one
//! message for it (initial load, a successful send, or a non-empty fetch).
//!
//! The tracker only *decides*. Removing the sidebar entry and firing the
//! backend delete are done by the caller, in that order, before the next
//! conversation's messages are requested.

use std::collections::HashSet;

use super::conversation::ConversationId;

/// Result of [`ConversationTracker::check_before_switch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// There was no current conversation; the new one was adopted.
    Adopted,
    /// The new id is already current.
    Unchanged,
    /// The previous conversation had messages; switched without cleanup.
    Switched,
    /// The previous conversation was empty and must be discarded.
    DiscardEmpty(ConversationId),
}

#[derive(Debug, Default)]
pub struct ConversationTracker {
    current: Option<ConversationId>,
    with_messages: HashSet<ConversationId>,
}

impl ConversationTracker {
    pub fn new(current: Option<ConversationId>) -> Self {
        Self {
            current,
            with_messages: HashSet::new(),
        }
    }

    pub fn current(&self) -> Option<ConversationId> {
        self.current
    }

    pub fn has_messages(&self, id: ConversationId) -> bool {
        self.with_messages.contains(&id)
    }

    pub fn mark_has_messages(&mut self, id: ConversationId) {
        if self.with_messages.insert(id) {
            log::debug!("Conversation {} marked as having messages", id);
        }
    }

    /// Decide what happens to the current conversation when `next` is opened.
    pub fn check_before_switch(&mut self, next: ConversationId) -> SwitchOutcome {
        let Some(current) = self.current else {
            self.current = Some(next);
            return SwitchOutcome::Adopted;
        };

        if current == next {
            return SwitchOutcome::Unchanged;
        }

        self.current = Some(next);
        if self.with_messages.contains(&current) {
            SwitchOutcome::Switched
        } else {
            self.with_messages.remove(&current);
            SwitchOutcome::DiscardEmpty(current)
        }
    }

    /// Final check when the client shuts down. Returns the current id if it is empty.
    pub fn check_before_leaving(&self) -> Option<ConversationId> {
        self.current.filter(|id| !self.with_messages.contains(id))
    }

    /// Drop everything known about a conversation that no longer exists.
    pub fn forget(&mut self, id: ConversationId) {
        self.with_messages.remove(&id);
        if self.current == Some(id) {
            self.current = None;
        }
    }
}
