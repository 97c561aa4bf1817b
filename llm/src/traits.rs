use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Model,
}

/// One message of a conversation sent to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Everything a backend needs to produce the next reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub turns: Vec<Turn>,
}

impl ChatRequest {
    /// A single-turn request with no system instruction.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system: None,
            turns: vec![Turn::user(text)],
        }
    }
}

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("invalid response")]
    InvalidResponse,
    #[error("empty input")]
    EmptyInput,
    #[error("model not found")]
    ModelNotFound,
}

impl From<reqwest::Error> for LLMError {
    fn from(e: reqwest::Error) -> Self {
        LLMError::Network(e.to_string())
    }
}

#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate the model's reply to the final turn of `request`.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LLMError>;

    /// Name of the model requests are routed to.
    fn model(&self) -> &str;
}
