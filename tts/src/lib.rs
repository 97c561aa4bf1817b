//! Turn reply text into stored audio using a pluggable speech engine.
//!
//! A [`Synthesizer`] produces raw audio for a piece of text. Two engines are
//! provided: [`GoogleTts`], which talks to the public translate TTS endpoint,
//! and [`CoquiTts`], which targets a local Coqui server. [`SpeechAdapter`]
//! wraps an engine, writes the audio into a served directory and hands back
//! the URL clients should fetch.

use async_trait::async_trait;
use emojito::find_emoji;
use thiserror::Error;

pub mod adapter;
pub mod coqui;
pub mod google;

pub use adapter::SpeechAdapter;
pub use coqui::CoquiTts;
pub use google::{GoogleTts, gtts_language};

#[derive(Debug, Error)]
pub enum TTSError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("tts server returned status {status}")]
    Api { status: u16 },
    #[error("tts engine returned no audio")]
    EmptyAudio,
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TTSError>;

/// Text-to-speech engine interface.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Return encoded audio for `text` spoken in `language`.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;

    /// File extension matching the audio encoding, without the dot.
    fn extension(&self) -> &'static str;

    /// Engine name reported to clients.
    fn name(&self) -> &'static str;
}

/// Remove emoji glyphs from `input`, returning the cleaned text and the
/// emojis that were found.
pub fn strip_emojis(input: &str) -> (String, Vec<String>) {
    let found = find_emoji(input);
    let mut cleaned = input.to_string();
    for e in &found {
        cleaned = cleaned.replace(e.glyph, "");
    }
    let emojis = found.iter().map(|e| e.glyph.to_string()).collect();
    (cleaned, emojis)
}
