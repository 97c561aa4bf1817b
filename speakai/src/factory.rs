//! Construct the service's collaborators from a validated [`Config`].

use std::path::PathBuf;
use std::sync::Arc;

use llm::{ChatSession, GeminiClient, LLMClient, OllamaClient};
use memory::HistoryBuffer;
use tokio::sync::Mutex;
use tracing::info;
use tts::{CoquiTts, GoogleTts, SpeechAdapter, Synthesizer};

use crate::{
    ChatService, Config, LlmBackend, PlaceholderTranscriber, TtsEngine,
    web::{AUDIO_URL_PREFIX, AppState, ServiceInfo},
};

/// Create the language-model client selected by `config`.
pub fn build_llm(config: &Config) -> anyhow::Result<Arc<dyn LLMClient>> {
    let client: Arc<dyn LLMClient> = match config.llm_backend {
        LlmBackend::Gemini => Arc::new(GeminiClient::with_base_url(
            &config.gemini_url,
            &config.gemini_api_key,
            &config.model_name,
        )),
        LlmBackend::Ollama => Arc::new(OllamaClient::new(&config.ollama_url, &config.model_name)?),
    };
    info!(backend = ?config.llm_backend, model = client.model(), "language model ready");
    Ok(client)
}

/// Create the speech adapter, or `None` when speech is disabled.
pub fn build_speech(config: &Config) -> anyhow::Result<Option<SpeechAdapter>> {
    let engine: Box<dyn Synthesizer> = match config.tts_engine {
        TtsEngine::Gtts => Box::new(GoogleTts::new(&config.gtts_url)),
        TtsEngine::Coqui => Box::new(CoquiTts::new(
            &config.coqui_url,
            config.tts_voice_id.clone(),
            config.tts_language.clone(),
        )),
        TtsEngine::None => return Ok(None),
    };
    let adapter = SpeechAdapter::new(engine, config.audio_dir(), AUDIO_URL_PREFIX)?;
    info!(engine = adapter.engine_name(), dir = %adapter.audio_dir().display(), "speech ready");
    Ok(Some(adapter))
}

/// Validate `config` and wire every collaborator into the shared state.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    config.validate()?;
    let mut session =
        ChatSession::new(build_llm(config)?).with_window(config.max_conversation_length);
    if let Some(prompt) = &config.system_prompt {
        session = session.with_system(prompt.clone());
    }
    let history = Arc::new(Mutex::new(HistoryBuffer::new(config.max_conversation_length)));
    let chat = ChatService::new(
        session,
        build_speech(config)?,
        history.clone(),
        config.languages(),
        config.enable_conversation_memory,
    );
    let info = ServiceInfo::from_config(config);
    Ok(AppState {
        chat: Arc::new(chat),
        history,
        transcriber: Arc::new(PlaceholderTranscriber),
        info: Arc::new(info),
        static_dir: PathBuf::from(&config.static_dir),
    })
}
