pub mod chat;
pub mod config;
pub mod ear;
pub mod error;
pub mod factory;
pub mod language;
pub mod logging;
pub mod web;

pub use chat::{ChatReply, ChatService};
pub use config::{Config, ConfigError, LlmBackend, TtsEngine};
pub use ear::{PlaceholderTranscriber, Transcriber};
pub use error::AppError;
pub use factory::{build_llm, build_speech, build_state};
pub use language::LanguageSet;
pub use logging::init_logging;
pub use web::{AppState, ServiceInfo, app};
