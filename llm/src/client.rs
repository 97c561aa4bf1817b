//! Chat client for a local Ollama server.
//!
//! [`OllamaClient`] implements [`LLMClient`] on top of `ollama-rs`, mapping
//! the session transcript onto Ollama chat messages.

use crate::traits::{ChatRequest, LLMClient, LLMError, Role};
use async_trait::async_trait;
use tracing::debug;

use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    Ollama,
};

pub struct OllamaClient {
    inner: Ollama,
    model: String,
}

impl OllamaClient {
    /// Connect to the server at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: impl AsRef<str>, model: impl Into<String>) -> Result<Self, LLMError> {
        let inner = Ollama::try_new(base_url.as_ref())
            .map_err(|e| LLMError::Network(e.to_string()))?;
        Ok(Self {
            inner,
            model: model.into(),
        })
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LLMError> {
        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.extend(request.turns.iter().map(|t| match t.role {
            Role::User => ChatMessage::user(t.text.clone()),
            Role::Model => ChatMessage::assistant(t.text.clone()),
        }));
        debug!(model = %self.model, messages = messages.len(), "sending ollama chat");
        let res = self
            .inner
            .send_chat_messages(ChatMessageRequest::new(self.model.clone(), messages))
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        let text = res.message.content.trim();
        if text.is_empty() {
            return Err(LLMError::InvalidResponse);
        }
        Ok(text.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
