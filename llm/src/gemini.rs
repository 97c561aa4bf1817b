//! HTTP client for Google's generative-language (`generateContent`) API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::{ChatRequest, LLMClient, LLMError, Role};

/// Public endpoint of the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client for `model` on the public endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, model)
    }

    /// Create a client targeting `base_url` (e.g. a proxy or a test server).
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LLMError> {
        let body = GenerateRequest {
            contents: request
                .turns
                .iter()
                .map(|t| Content {
                    role: Some(role_name(t.role)),
                    parts: vec![Part { text: &t.text }],
                })
                .collect(),
            system_instruction: request.system.as_deref().map(|s| Content {
                role: None,
                parts: vec![Part { text: s }],
            }),
        };
        debug!(model = %self.model, turns = request.turns.len(), "requesting generateContent");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LLMError::ModelNotFound);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LLMError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|_| LLMError::InvalidResponse)?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or(LLMError::InvalidResponse)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LLMError::InvalidResponse);
        }
        Ok(text.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
