//! # Conversation Model
//!
//! Client-side projection of the server-owned conversation data.
//!
//! ```text
//! Conversation (server-owned)
//! ├── id: ConversationId        // opaque ordinal
//! ├── title: String
//! ├── updated_at: String        // display text, as sent by the server
//! └── messages: Vec<Message>    // append-only
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier of a conversation on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub u64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message. Serialized as `tipo` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// A rendered transcript message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Display timestamp ("14:05" for local messages, server text otherwise).
    pub timestamp: String,
}

impl Message {
    /// A message authored now, stamped with the local wall clock.
    pub fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: local_time_label(),
        }
    }
}

/// Browser-style URL of a conversation page.
pub fn conversation_url(id: ConversationId) -> String {
    format!("/gameplay/chat/{id}/")
}

static REDIRECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/chat/(\d+)/").expect("redirect pattern is a valid regex")
});

/// Extract the conversation id out of a redirect URL such as `/gameplay/chat/12/`.
pub fn parse_redirect(url: &str) -> Option<ConversationId> {
    REDIRECT_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .map(ConversationId)
}

fn local_time_label() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
