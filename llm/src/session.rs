//! Stateful chat handle shared by every request of the process.

use std::sync::Arc;

use memory::Exchange;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::traits::{ChatRequest, LLMClient, LLMError, Turn};

/// Reply shown to the user when generation fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that. Please try again.";

/// Reply used when a summary cannot be produced.
pub const SUMMARY_FALLBACK: &str = "Unable to generate summary";

/// Number of trailing exchanges included in a summary prompt.
const SUMMARY_WINDOW: usize = 5;

/// A running conversation with a language model.
///
/// Every successful [`send`](ChatSession::send) appends the user turn and the
/// reply to the transcript so later requests carry the earlier context. Failed
/// requests leave the transcript untouched. With a window set, only the most
/// recent exchanges are kept.
pub struct ChatSession {
    client: Arc<dyn LLMClient>,
    system: Option<String>,
    max_turns: Option<usize>,
    transcript: Mutex<Vec<Turn>>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            system: None,
            max_turns: None,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Attach a system instruction sent with every request.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Keep at most `exchanges` user/model pairs in the transcript.
    pub fn with_window(mut self, exchanges: usize) -> Self {
        self.max_turns = Some(exchanges.saturating_mul(2));
        self
    }

    /// Send `user_input` and return the model's reply.
    ///
    /// A per-call `system_prompt` is prefixed onto the user turn as
    /// `"{system_prompt}\n\nUser: {user_input}"`.
    pub async fn send(
        &self,
        user_input: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, LLMError> {
        let input = user_input.trim();
        if input.is_empty() {
            return Err(LLMError::EmptyInput);
        }
        let turn = match system_prompt {
            Some(prompt) => Turn::user(format!("{prompt}\n\nUser: {input}")),
            None => Turn::user(input),
        };

        let mut turns = self.transcript.lock().await.clone();
        turns.push(turn.clone());
        let request = ChatRequest {
            system: self.system.clone(),
            turns,
        };
        let reply = self.client.complete(&request).await?;

        let mut transcript = self.transcript.lock().await;
        transcript.push(turn);
        transcript.push(Turn::model(reply.clone()));
        if let Some(max) = self.max_turns {
            let excess = transcript.len().saturating_sub(max);
            transcript.drain(..excess);
        }
        info!(
            "generated response for: {}",
            input.chars().take(50).collect::<String>()
        );
        Ok(reply)
    }

    /// Summarize the last few `exchanges` in a one-off request.
    pub async fn summarize(&self, exchanges: &[Exchange]) -> Result<String, LLMError> {
        let start = exchanges.len().saturating_sub(SUMMARY_WINDOW);
        let messages = exchanges[start..]
            .iter()
            .map(|e| format!("User: {}\nAI: {}", e.user_text, e.ai_text))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Summarize this conversation briefly:\n{messages}\n\nProvide a concise 2-3 sentence summary."
        );
        self.client.complete(&ChatRequest::prompt(prompt)).await.map_err(|e| {
            warn!(error = %e, "summary request failed");
            e
        })
    }

    /// Forget every turn exchanged so far.
    pub async fn reset(&self) {
        self.transcript.lock().await.clear();
    }

    /// Number of turns in the transcript.
    pub async fn turns(&self) -> usize {
        self.transcript.lock().await.len()
    }
}
