//! Client for the translate TTS endpoint used by gTTS.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use crate::{Result, Synthesizer, TTSError};

/// Public endpoint serving `translate_tts`.
pub const DEFAULT_URL: &str = "https://translate.google.com";

/// Longest piece of text the endpoint accepts per request.
const MAX_CHUNK_CHARS: usize = 100;

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence regex"));

/// Map a language tag onto a voice the endpoint understands.
///
/// Only the primary subtag is considered; unknown languages fall back to
/// English.
pub fn gtts_language(tag: &str) -> &'static str {
    let primary = tag
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match primary.as_str() {
        "hi" => "hi",
        "es" => "es",
        "fr" => "fr",
        "de" => "de",
        "ja" => "ja",
        _ => "en",
    }
}

/// Split `text` into sentence-sized pieces no longer than the request limit.
pub(crate) fn chunks(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        sentences.push(&text[start..m.end()]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    let mut out = Vec::new();
    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if sentence.chars().count() <= MAX_CHUNK_CHARS {
            out.push(sentence.to_string());
            continue;
        }
        let mut current = String::new();
        for word in sentence.split_whitespace() {
            let sep = if current.is_empty() { 0 } else { 1 };
            let needed = sep + word.chars().count();
            if current.chars().count() + needed > MAX_CHUNK_CHARS && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            if word.chars().count() > MAX_CHUNK_CHARS {
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(MAX_CHUNK_CHARS) {
                    out.push(piece.iter().collect());
                }
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

/// MP3 synthesis via `translate_tts`, one request per chunk.
#[derive(Clone)]
pub struct GoogleTts {
    base_url: String,
    client: Client,
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl GoogleTts {
    /// Create a new client targeting `base_url` (e.g. `https://translate.google.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Synthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let lang = gtts_language(language);
        let url = format!("{}/translate_tts", self.base_url);
        let mut audio = Vec::new();
        for chunk in chunks(text) {
            debug!(lang, chars = chunk.chars().count(), "requesting gtts chunk");
            let resp = self
                .client
                .get(&url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("q", chunk.as_str()),
                ])
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(TTSError::Api {
                    status: resp.status().as_u16(),
                });
            }
            audio.extend_from_slice(&resp.bytes().await?);
        }
        Ok(audio)
    }

    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn name(&self) -> &'static str {
        "gtts"
    }
}
