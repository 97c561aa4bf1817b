use async_trait::async_trait;
use tracing::info;

/// Speech-to-text engine interface.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Recognize speech in an uploaded audio file. `None` means nothing
    /// could be recognized.
    async fn transcribe(&self, audio: &[u8]) -> Option<String>;
}

/// Stand-in transcriber until a real recognition engine is wired up.
///
/// It acknowledges any non-empty upload with a fixed phrase.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderTranscriber;

impl PlaceholderTranscriber {
    pub const ACKNOWLEDGEMENT: &'static str = "I'm listening";
}

#[async_trait]
impl Transcriber for PlaceholderTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Option<String> {
        if audio.is_empty() {
            return None;
        }
        info!(bytes = audio.len(), "processing audio");
        Some(Self::ACKNOWLEDGEMENT.to_string())
    }
}
