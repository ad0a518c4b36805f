use std::fmt;

use async_trait::async_trait;

use super::types::{ChatReply, ConversationMessages, DeleteOutcome, NewConversation};
use crate::core::conversation::ConversationId;

/// Errors that can occur while talking to the chat backend.
/// None of them is retried; the controller turns each into a fixed toast.
#[derive(Debug)]
pub enum BackendError {
    /// No CSRF token available. Raised before the request is sent.
    MissingCsrfToken,
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-2xx status.
    Http { status: u16, body: String },
    /// Response body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::MissingCsrfToken => write!(f, "CSRF token not available"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Http { status, body } => write!(f, "HTTP error {status}: {body}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The four operations the chat widget needs from the server.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `POST /gameplay/chat/api/`
    async fn send_message(
        &self,
        text: &str,
        conversation: Option<ConversationId>,
    ) -> Result<ChatReply, BackendError>;

    /// `GET /gameplay/chat/mensajes/{id}/`
    async fn fetch_messages(&self, id: ConversationId)
    -> Result<ConversationMessages, BackendError>;

    /// `POST /gameplay/chat/nueva/`
    async fn create_conversation(&self) -> Result<NewConversation, BackendError>;

    /// `DELETE /gameplay/chat/eliminar/{id}/`
    async fn delete_conversation(&self, id: ConversationId)
    -> Result<DeleteOutcome, BackendError>;
}
