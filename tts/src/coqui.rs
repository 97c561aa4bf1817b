use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::{Result, Synthesizer, TTSError};

/// Client for a Coqui TTS server.
#[derive(Clone)]
pub struct CoquiTts {
    url: String,
    client: Client,
    speaker_id: Option<String>,
    /// Optional language code passed as the `language_id` query parameter
    language_id: Option<String>,
}

impl CoquiTts {
    /// Create a new client targeting `url` (e.g. `http://localhost:5002/api/tts`).
    ///
    /// Optional `speaker_id` selects the voice. `language_id` is forwarded for
    /// multilingual models.
    pub fn new(
        url: impl Into<String>,
        speaker_id: Option<String>,
        language_id: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            speaker_id,
            language_id,
        }
    }
}

#[async_trait]
impl Synthesizer for CoquiTts {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>> {
        info!(url = %self.url, "requesting TTS");
        // The server expects every parameter even when unused.
        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("text", text),
                ("speaker_id", self.speaker_id.as_deref().unwrap_or("p123")),
                ("style_wav", ""),
                ("language_id", self.language_id.as_deref().unwrap_or("")),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(TTSError::Api {
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    fn extension(&self) -> &'static str {
        "wav"
    }

    fn name(&self) -> &'static str {
        "coqui"
    }
}
