#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use llm::{ChatRequest, ChatSession, LLMClient, LLMError};
use memory::HistoryBuffer;
use speakai::{AppState, ChatService, LanguageSet, PlaceholderTranscriber, ServiceInfo};
use tokio::sync::Mutex;
use tts::{SpeechAdapter, Synthesizer, TTSError};

/// Language model that echoes the last user turn, or fails on demand.
pub struct EchoLlm {
    pub fail: bool,
    pub requests: StdMutex<Vec<ChatRequest>>,
}

impl EchoLlm {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            requests: StdMutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LLMClient for EchoLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LLMError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(LLMError::Network("unreachable".into()));
        }
        let last = request.turns.last().map(|t| t.text.clone()).unwrap_or_default();
        Ok(format!("echo: {last}"))
    }

    fn model(&self) -> &str {
        "echo"
    }
}

/// Speech engine returning a few bytes, or failing on demand.
pub struct FakeVoice {
    pub fail: bool,
}

#[async_trait]
impl Synthesizer for FakeVoice {
    async fn synthesize(&self, _text: &str, _language: &str) -> tts::Result<Vec<u8>> {
        if self.fail {
            return Err(TTSError::Api { status: 503 });
        }
        Ok(b"ID3".to_vec())
    }

    fn extension(&self) -> &'static str {
        "mp3"
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn languages() -> LanguageSet {
    LanguageSet::new(["en", "hi", "es", "fr", "de", "ja"], "en")
}

pub struct Harness {
    pub llm_fails: bool,
    pub tts: Option<bool>,
    pub capacity: usize,
    pub remember: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            llm_fails: false,
            tts: Some(false),
            capacity: 50,
            remember: true,
        }
    }
}

impl Harness {
    pub fn service(&self, static_dir: &Path) -> (ChatService, Arc<Mutex<HistoryBuffer>>) {
        let (service, history, _) = self.service_with_llm(static_dir);
        (service, history)
    }

    /// Like [`Harness::service`], also handing back the model to inspect requests.
    pub fn service_with_llm(
        &self,
        static_dir: &Path,
    ) -> (ChatService, Arc<Mutex<HistoryBuffer>>, Arc<EchoLlm>) {
        let llm = EchoLlm::new(self.llm_fails);
        let session = ChatSession::new(llm.clone()).with_window(self.capacity);
        let speech = self.tts.map(|fail| {
            SpeechAdapter::new(
                Box::new(FakeVoice { fail }),
                static_dir.join("audio"),
                "/static/audio",
            )
            .unwrap()
        });
        let history = Arc::new(Mutex::new(HistoryBuffer::new(self.capacity)));
        let service = ChatService::new(session, speech, history.clone(), languages(), self.remember);
        (service, history, llm)
    }

    pub fn state(&self, static_dir: &Path) -> AppState {
        self.state_with_llm(static_dir).0
    }

    pub fn state_with_llm(&self, static_dir: &Path) -> (AppState, Arc<EchoLlm>) {
        let (service, history, llm) = self.service_with_llm(static_dir);
        let state = AppState {
            chat: Arc::new(service),
            history,
            transcriber: Arc::new(PlaceholderTranscriber),
            info: Arc::new(ServiceInfo {
                app_name: "Speak.AI".into(),
                version: "1.0.0".into(),
                languages: languages().tags().to_vec(),
                default_language: "en".into(),
                tts_engine: "fake".into(),
                enable_memory: self.remember,
            }),
            static_dir: static_dir.to_path_buf(),
        };
        (state, llm)
    }
}
