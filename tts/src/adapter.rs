use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{Result, Synthesizer, TTSError, strip_emojis};

/// Synthesizes replies and stores them where the web layer serves them.
pub struct SpeechAdapter {
    engine: Box<dyn Synthesizer>,
    audio_dir: PathBuf,
    url_prefix: String,
}

impl SpeechAdapter {
    /// Wrap `engine`, saving audio under `audio_dir` and exposing it below
    /// `url_prefix` (e.g. `/static/audio`). The directory is created if missing.
    pub fn new(
        engine: Box<dyn Synthesizer>,
        audio_dir: impl Into<PathBuf>,
        url_prefix: impl Into<String>,
    ) -> Result<Self> {
        let audio_dir = audio_dir.into();
        std::fs::create_dir_all(&audio_dir)?;
        Ok(Self {
            engine,
            audio_dir,
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Speak `text` in `language` and return the URL of the stored audio.
    ///
    /// Text that is empty once emojis are removed yields `Ok(None)`.
    pub async fn text_to_speech(&self, text: &str, language: &str) -> Result<Option<String>> {
        let (clean, _emojis) = strip_emojis(text);
        let clean = clean.trim();
        if clean.is_empty() {
            warn!("empty text provided for TTS");
            return Ok(None);
        }
        let audio = self.engine.synthesize(clean, language).await?;
        if audio.is_empty() {
            return Err(TTSError::EmptyAudio);
        }
        let id = Uuid::new_v4().simple().to_string();
        let file = format!(
            "response_{}_{}.{}",
            &id[..8],
            Utc::now().timestamp_millis(),
            self.engine.extension()
        );
        tokio::fs::write(self.audio_dir.join(&file), audio).await?;
        info!(%file, engine = self.engine.name(), "audio generated");
        Ok(Some(format!("{}/{}", self.url_prefix, file)))
    }
}
