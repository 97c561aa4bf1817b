//! Abstractions for talking to conversational language models.
//!
//! The `llm` crate defines an [`LLMClient`] trait along with two concrete
//! backends: [`GeminiClient`] for Google's generative-language API and
//! [`OllamaClient`] for a local Ollama server. [`ChatSession`] layers a
//! running transcript on top of either so each reply sees the earlier turns.

pub mod client;
pub mod gemini;
pub mod session;
pub mod traits;

pub use client::OllamaClient;
pub use gemini::GeminiClient;
pub use session::{ChatSession, FALLBACK_REPLY, SUMMARY_FALLBACK};
pub use traits::{ChatRequest, LLMClient, LLMError, Role, Turn};
