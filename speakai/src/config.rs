//! Service settings read from the command line or the environment.
//!
//! Every option has an environment variable of the same meaning; a `.env`
//! file is loaded before parsing so deployments can keep credentials out of
//! the command line.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum, builder::BoolishValueParser};
use thiserror::Error;

use crate::LanguageSet;

/// Which language-model backend answers chat messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LlmBackend {
    Gemini,
    Ollama,
}

/// Which speech engine voices replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TtsEngine {
    Gtts,
    Coqui,
    None,
}

impl TtsEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsEngine::Gtts => "gtts",
            TtsEngine::Coqui => "coqui",
            TtsEngine::None => "none",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    MissingCredential(&'static str),
    #[error("no supported languages configured")]
    NoLanguages,
    #[error("default language {0:?} is not in the supported set")]
    UnsupportedDefaultLanguage(String),
    #[error("MAX_CONVERSATION_LENGTH must be at least 1")]
    ZeroHistory,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Conversational web backend with speech output")]
pub struct Config {
    /// API key for the generative-language API
    #[arg(long, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Model answering chat messages
    #[arg(long, env = "MODEL_NAME", default_value = "gemini-pro")]
    pub model_name: String,

    #[arg(long, env = "LLM_BACKEND", value_enum, default_value_t = LlmBackend::Gemini)]
    pub llm_backend: LlmBackend,

    /// Base URL of the generative-language API
    #[arg(long, env = "GEMINI_URL", default_value = llm::gemini::DEFAULT_BASE_URL)]
    pub gemini_url: String,

    /// Base URL of the Ollama server
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Instruction sent with every chat request
    #[arg(long, env = "SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    #[arg(long, env = "TTS_ENGINE", value_enum, default_value_t = TtsEngine::Gtts)]
    pub tts_engine: TtsEngine,

    /// Base URL of the translate TTS endpoint
    #[arg(long, env = "GTTS_URL", default_value = tts::google::DEFAULT_URL)]
    pub gtts_url: String,

    /// Coqui TTS endpoint
    #[arg(long, env = "COQUI_URL", default_value = "http://localhost:5002/api/tts")]
    pub coqui_url: String,

    /// Coqui speaker id
    #[arg(long, env = "TTS_VOICE_ID")]
    pub tts_voice_id: Option<String>,

    /// Coqui language id for multilingual models
    #[arg(long, env = "TTS_LANGUAGE")]
    pub tts_language: Option<String>,

    #[arg(
        long,
        env = "SUPPORTED_LANGUAGES",
        value_delimiter = ',',
        default_value = "en,hi,es,fr,de,ja"
    )]
    pub supported_languages: Vec<String>,

    #[arg(long, env = "DEFAULT_LANGUAGE", default_value = "en")]
    pub default_language: String,

    /// Verbose logging
    #[arg(long, env = "DEBUG", default_value = "false", value_parser = BoolishValueParser::new())]
    pub debug: bool,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "APP_NAME", default_value = "Speak.AI")]
    pub app_name: String,

    /// Version reported by the API
    #[arg(long = "app-version", env = "VERSION", default_value = "1.0.0")]
    pub app_version: String,

    /// Address to bind the HTTP server
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Record exchanges in the conversation history
    #[arg(
        long,
        env = "ENABLE_CONVERSATION_MEMORY",
        default_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub enable_conversation_memory: bool,

    /// Number of exchanges kept in the history
    #[arg(long, env = "MAX_CONVERSATION_LENGTH", default_value_t = memory::DEFAULT_CAPACITY)]
    pub max_conversation_length: usize,

    /// Directory served under `/static`; audio is written to its `audio` folder
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Config {
    /// Check the settings needed to serve requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_backend == LlmBackend::Gemini && self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("GEMINI_API_KEY"));
        }
        let languages = self.languages();
        if languages.tags().is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        if !languages.contains(&self.default_language) {
            return Err(ConfigError::UnsupportedDefaultLanguage(
                self.default_language.clone(),
            ));
        }
        if self.max_conversation_length == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }

    pub fn languages(&self) -> LanguageSet {
        LanguageSet::new(&self.supported_languages, &self.default_language)
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> String {
        if self.debug {
            "debug".into()
        } else {
            self.log_level.to_ascii_lowercase()
        }
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir.join("audio")
    }
}
