//! Per-request orchestration: reply, speak, remember.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use llm::{ChatSession, FALLBACK_REPLY, SUMMARY_FALLBACK};
use memory::{Exchange, HistoryBuffer};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, warn};
use tts::SpeechAdapter;

use crate::{AppError, LanguageSet};

/// Payload returned for one chat round.
#[derive(Clone, Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub audio_url: Option<String>,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

/// Sequences the language model, the speech engine and the history buffer.
pub struct ChatService {
    session: ChatSession,
    speech: Option<SpeechAdapter>,
    history: Arc<Mutex<HistoryBuffer>>,
    languages: LanguageSet,
    remember: bool,
}

impl ChatService {
    pub fn new(
        session: ChatSession,
        speech: Option<SpeechAdapter>,
        history: Arc<Mutex<HistoryBuffer>>,
        languages: LanguageSet,
        remember: bool,
    ) -> Self {
        Self {
            session,
            speech,
            history,
            languages,
            remember,
        }
    }

    /// Answer `message`, voice the answer when possible and record it.
    ///
    /// Generation failures are answered with [`FALLBACK_REPLY`]; speech
    /// failures only drop the audio URL. Both still produce a history entry.
    pub async fn chat(&self, message: &str, language: Option<&str>) -> Result<ChatReply, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::validation("Empty message"));
        }
        let language = self.languages.resolve(language)?;

        let response = match self.session.send(message, None).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "error generating response");
                FALLBACK_REPLY.to_string()
            }
        };

        let audio_url = match &self.speech {
            Some(speech) => match speech.text_to_speech(&response, &language).await {
                Ok(url) => url,
                Err(e) => {
                    warn!(error = %e, "speech synthesis failed");
                    None
                }
            },
            None => None,
        };

        if self.remember {
            self.history
                .lock()
                .await
                .append(Exchange::new(message, response.clone(), language.clone()));
        }

        Ok(ChatReply {
            response,
            audio_url,
            language,
            timestamp: Utc::now(),
        })
    }

    /// Forget the recorded exchanges and the model's running context.
    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
        self.session.reset().await;
    }

    /// Summarize the recent conversation.
    pub async fn summary(&self) -> String {
        let exchanges: Vec<Exchange> = self.history.lock().await.iter().cloned().collect();
        if exchanges.is_empty() {
            return SUMMARY_FALLBACK.to_string();
        }
        self.session
            .summarize(&exchanges)
            .await
            .unwrap_or_else(|_| SUMMARY_FALLBACK.to_string())
    }
}
