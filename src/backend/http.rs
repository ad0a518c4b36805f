//! HTTP implementation of [`ChatBackend`] against the Django chat endpoints.
//!
//! Every mutating request carries `X-CSRFToken` plus the configured cookie and
//! a same-origin `Referer`. Without a token the request is never sent.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::client::{BackendError, ChatBackend};
use super::csrf;
use super::types::{
    ChatReply, ConversationMessages, ConversationMessagesResponse, DeleteConversationResponse,
    DeleteOutcome, NewConversation, NewConversationResponse, SendMessageRequest,
    SendMessageResponse,
};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::ConversationId;

pub struct HttpBackend {
    base_url: String,
    cookie: Option<String>,
    csrf_fallback: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, cookie: Option<String>, csrf_fallback: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie,
            csrf_fallback,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.cookie.clone(),
            config.csrf_token.clone(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn csrf_token(&self) -> Result<String, BackendError> {
        csrf::resolve_csrf_token(self.cookie.as_deref(), self.csrf_fallback.as_deref())
            .ok_or(BackendError::MissingCsrfToken)
    }

    /// Attach session cookie and, for mutating requests, the CSRF headers.
    fn authorize(&self, builder: RequestBuilder, csrf_token: Option<&str>) -> RequestBuilder {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(reqwest::header::COOKIE, cookie),
            None => builder,
        };
        match csrf_token {
            Some(token) => builder
                .header("X-CSRFToken", token)
                .header(reqwest::header::REFERER, format!("{}/", self.base_url)),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    debug!("Backend response status: {}", status);

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Backend error: {} - {}", status.as_u16(), body);
        return Err(BackendError::Http {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Parse(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(
        &self,
        text: &str,
        conversation: Option<ConversationId>,
    ) -> Result<ChatReply, BackendError> {
        let token = self.csrf_token()?;
        info!(
            "Sending message to conversation {:?} ({} chars)",
            conversation,
            text.chars().count()
        );
        let request = SendMessageRequest {
            message: text,
            conversation_id: conversation,
        };
        let builder = self.client.post(self.url("/gameplay/chat/api/")).json(&request);
        let response: SendMessageResponse = self.execute(self.authorize(builder, Some(token.as_str()))).await?;
        Ok(response.into())
    }

    async fn fetch_messages(
        &self,
        id: ConversationId,
    ) -> Result<ConversationMessages, BackendError> {
        info!("Fetching messages for conversation {}", id);
        let builder = self
            .client
            .get(self.url(&format!("/gameplay/chat/mensajes/{id}/")))
            .header(reqwest::header::ACCEPT, "application/json");
        let response: ConversationMessagesResponse = self.execute(self.authorize(builder, None)).await?;
        Ok(response.into())
    }

    async fn create_conversation(&self) -> Result<NewConversation, BackendError> {
        let token = self.csrf_token()?;
        info!("Creating conversation");
        let builder = self.client.post(self.url("/gameplay/chat/nueva/"));
        let response: NewConversationResponse = self.execute(self.authorize(builder, Some(token.as_str()))).await?;
        let id = response
            .id
            .ok_or_else(|| BackendError::Parse("missing conversacion_id".to_string()))?;
        Ok(NewConversation {
            id,
            title: response.title,
            updated_at: response.updated_at,
        })
    }

    async fn delete_conversation(
        &self,
        id: ConversationId,
    ) -> Result<DeleteOutcome, BackendError> {
        let token = self.csrf_token()?;
        info!("Deleting conversation {}", id);
        let builder = self
            .client
            .delete(self.url(&format!("/gameplay/chat/eliminar/{id}/")))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response: DeleteConversationResponse = self.execute(self.authorize(builder, Some(token.as_str()))).await?;
        Ok(response.into())
    }
}
