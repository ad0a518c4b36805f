//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;

use crate::backend::{
    BackendError, ChatBackend, ChatReply, ConversationMessages, DeleteOutcome, NewConversation,
};
use crate::core::conversation::{ConversationId, Message, Role};
use crate::core::prefs::UiPrefs;
use crate::core::state::{App, WidgetSettings};

/// One call seen by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Send(String, Option<ConversationId>),
    Fetch(ConversationId),
    Create,
    Delete(ConversationId),
}

/// In-memory backend that records calls and answers predictably.
///
/// Replies echo the message, fetches return an empty conversation, creates
/// hand out increasing ids starting at 100. With `offline` set, every call
/// fails with a network error.
pub struct MockBackend {
    calls: Mutex<Vec<BackendCall>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(100),
            offline: AtomicBool::new(false),
        }
    }

    pub fn offline() -> Self {
        let backend = Self::new();
        backend.offline.store(true, Ordering::SeqCst);
        backend
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Network("offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn send_message(
        &self,
        text: &str,
        conversation: Option<ConversationId>,
    ) -> Result<ChatReply, BackendError> {
        self.record(BackendCall::Send(text.to_string(), conversation))?;
        Ok(ChatReply {
            text: Ok(format!("eco: {text}")),
            first_message: false,
            new_title: None,
        })
    }

    async fn fetch_messages(&self, id: ConversationId) -> Result<ConversationMessages, BackendError> {
        self.record(BackendCall::Fetch(id))?;
        Ok(conversation(id.0, "Nueva conversación", &[]))
    }

    async fn create_conversation(&self) -> Result<NewConversation, BackendError> {
        self.record(BackendCall::Create)?;
        Ok(new_conversation(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete_conversation(&self, id: ConversationId) -> Result<DeleteOutcome, BackendError> {
        self.record(BackendCall::Delete(id))?;
        Ok(DeleteOutcome {
            success: true,
            next: None,
        })
    }
}

/// Creates a test App: default timings, sidebar visible, no voice support.
pub fn test_app() -> App {
    App::new(WidgetSettings::default(), UiPrefs::default(), false, Instant::now())
}

pub fn conversation(id: u64, title: &str, messages: &[(Role, &str)]) -> ConversationMessages {
    ConversationMessages {
        id: ConversationId(id),
        title: title.to_string(),
        messages: messages
            .iter()
            .map(|(role, text)| Message {
                role: *role,
                text: text.to_string(),
                timestamp: "10:00".to_string(),
            })
            .collect(),
    }
}

pub fn new_conversation(id: u64) -> NewConversation {
    NewConversation {
        id: ConversationId(id),
        title: "Nueva conversación".to_string(),
        updated_at: "10:00".to_string(),
    }
}
