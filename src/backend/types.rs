//! Wire types for the chat backend and their domain counterparts.
//!
//! The server speaks Spanish field names; everything past this module uses
//! the domain types below.

use serde::{Deserialize, Serialize};

use crate::core::conversation::{self, ConversationId, Message, Role};
use crate::core::texts;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize, Debug)]
pub struct SendMessageRequest<'a> {
    #[serde(rename = "mensaje")]
    pub message: &'a str,
    #[serde(rename = "conversacion_id")]
    pub conversation_id: Option<ConversationId>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SendMessageResponse {
    #[serde(rename = "respuesta")]
    pub reply: Option<String>,
    pub error: Option<String>,
    #[serde(rename = "es_primer_mensaje", default)]
    pub first_message: bool,
    #[serde(rename = "nuevo_titulo")]
    pub new_title: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct WireMessage {
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "mensaje")]
    pub text: String,
    #[serde(rename = "fecha", default)]
    pub timestamp: String,
}

#[derive(Deserialize, Debug)]
pub struct ConversationMessagesResponse {
    #[serde(rename = "conversacion_id")]
    pub id: ConversationId,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "mensajes", default)]
    pub messages: Vec<WireMessage>,
}

#[derive(Deserialize, Debug)]
pub struct NewConversationResponse {
    #[serde(rename = "conversacion_id")]
    pub id: Option<ConversationId>,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "fecha_actualizacion", default)]
    pub updated_at: String,
}

#[derive(Deserialize, Debug)]
pub struct DeleteConversationResponse {
    #[serde(default)]
    pub success: bool,
    pub redirect_url: Option<String>,
}

// ============================================================================
// Domain types
// ============================================================================

/// Outcome of sending a message: the assistant's answer or the server's
/// rejection text, plus title metadata for the first exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: Result<String, String>,
    pub first_message: bool,
    pub new_title: Option<String>,
}

impl ChatReply {
    /// What the bot bubble shows, whichever branch the reply took.
    pub fn display_text(&self) -> &str {
        match &self.text {
            Ok(text) | Err(text) => text,
        }
    }

    /// The title to animate, if this reply starts the conversation.
    pub fn title_update(&self) -> Option<&str> {
        self.new_title
            .as_deref()
            .filter(|t| self.first_message && !t.is_empty())
    }
}

impl From<SendMessageResponse> for ChatReply {
    fn from(response: SendMessageResponse) -> Self {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        let text = match (non_empty(response.reply), non_empty(response.error)) {
            (Some(reply), _) => Ok(reply),
            (None, Some(error)) => Err(error),
            (None, None) => Err(texts::INVALID_RESPONSE.message.to_string()),
        };
        Self {
            text,
            first_message: response.first_message,
            new_title: response.new_title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessages {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Message>,
}

impl From<ConversationMessagesResponse> for ConversationMessages {
    fn from(response: ConversationMessagesResponse) -> Self {
        Self {
            id: response.id,
            title: response.title,
            messages: response
                .messages
                .into_iter()
                .map(|m| Message {
                    role: m.role,
                    text: m.text,
                    timestamp: m.timestamp,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub id: ConversationId,
    pub title: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub success: bool,
    /// Conversation the server suggests opening next.
    pub next: Option<ConversationId>,
}

impl From<DeleteConversationResponse> for DeleteOutcome {
    fn from(response: DeleteConversationResponse) -> Self {
        Self {
            success: response.success,
            next: response
                .redirect_url
                .as_deref()
                .and_then(conversation::parse_redirect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_from(json: &str) -> ChatReply {
        let response: SendMessageResponse = serde_json::from_str(json).unwrap();
        response.into()
    }

    #[test]
    fn test_send_request_uses_wire_names() {
        let request = SendMessageRequest {
            message: "Hola",
            conversation_id: Some(ConversationId(3)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"mensaje": "Hola", "conversacion_id": 3}));
    }

    #[test]
    fn test_reply_prefers_respuesta() {
        let reply = reply_from(
            r#"{"respuesta":"Hola, ¿en qué ayudo?","es_primer_mensaje":true,"nuevo_titulo":"Saludo"}"#,
        );
        assert_eq!(reply.text, Ok("Hola, ¿en qué ayudo?".to_string()));
        assert_eq!(reply.title_update(), Some("Saludo"));
    }

    #[test]
    fn test_reply_falls_back_to_error_field() {
        let reply = reply_from(r#"{"respuesta":"","error":"Sin permisos"}"#);
        assert_eq!(reply.text, Err("Sin permisos".to_string()));
        assert_eq!(reply.display_text(), "Sin permisos");
    }

    #[test]
    fn test_reply_without_text_is_invalid_response() {
        let reply = reply_from("{}");
        assert_eq!(reply.display_text(), "Respuesta inválida del servidor");
        assert!(!reply.first_message);
    }

    #[test]
    fn test_title_only_on_first_message() {
        let reply = reply_from(r#"{"respuesta":"ok","nuevo_titulo":"Ventas"}"#);
        assert_eq!(reply.title_update(), None);
    }

    #[test]
    fn test_conversation_messages_conversion() {
        let json = r#"{
            "conversacion_id": 4,
            "titulo": "Inventario",
            "mensajes": [
                {"tipo": "user", "mensaje": "¿Stock?", "fecha": "10:00"},
                {"tipo": "bot", "mensaje": "Quedan 3", "fecha": "10:01"}
            ]
        }"#;
        let response: ConversationMessagesResponse = serde_json::from_str(json).unwrap();
        let conv: ConversationMessages = response.into();
        assert_eq!(conv.id, ConversationId(4));
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[1].role, Role::Bot);
        assert_eq!(conv.messages[1].timestamp, "10:01");
    }

    #[test]
    fn test_delete_outcome_parses_redirect() {
        let response: DeleteConversationResponse =
            serde_json::from_str(r#"{"success":true,"redirect_url":"/gameplay/chat/11/"}"#)
                .unwrap();
        let outcome: DeleteOutcome = response.into();
        assert!(outcome.success);
        assert_eq!(outcome.next, Some(ConversationId(11)));
    }

    #[test]
    fn test_delete_outcome_without_redirect() {
        let response: DeleteConversationResponse = serde_json::from_str("{}").unwrap();
        let outcome: DeleteOutcome = response.into();
        assert!(!outcome.success);
        assert_eq!(outcome.next, None);
    }
}
