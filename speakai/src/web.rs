use axum::{
    Json, Router,
    extract::{
        Multipart, Query, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Html,
    routing::{get, post},
};
use chrono::Utc;
use memory::{HistoryBuffer, Recent};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::{AppError, ChatReply, ChatService, Config, Transcriber};

/// Limit applied when `/api/history` is called without one.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Public URL under which synthesized audio is served.
pub const AUDIO_URL_PREFIX: &str = "/static/audio";

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub history: Arc<Mutex<HistoryBuffer>>,
    pub transcriber: Arc<dyn Transcriber>,
    pub info: Arc<ServiceInfo>,
    pub static_dir: PathBuf,
}

/// Settings clients may read through `/api/config`.
#[derive(Clone, Debug, Serialize)]
pub struct ServiceInfo {
    pub app_name: String,
    pub version: String,
    pub languages: Vec<String>,
    pub default_language: String,
    pub tts_engine: String,
    pub enable_memory: bool,
}

impl ServiceInfo {
    pub fn from_config(config: &Config) -> Self {
        let languages = config.languages();
        Self {
            app_name: config.app_name.clone(),
            version: config.app_version.clone(),
            languages: languages.tags().to_vec(),
            default_language: languages.default_tag().to_string(),
            tts_engine: config.tts_engine.as_str().to_string(),
            enable_memory: config.enable_conversation_memory,
        }
    }
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    info!("index requested");
    Html(format!(
        "<!doctype html><title>{name}</title><p>{name} v{version} is running. POST /api/chat to talk.</p>",
        name = state.info.app_name,
        version = state.info.version,
    ))
}

pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(req) = body.map_err(|e| AppError::validation(e.body_text()))?;
    debug!("user message: {}", req.message);
    let reply = state.chat.chat(&req.message, req.language.as_deref()).await?;
    Ok(Json(reply))
}

pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::validation("No audio provided"))?;
    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        if field.name() == Some("audio") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            audio = Some(bytes);
            break;
        }
    }
    let audio = audio.ok_or_else(|| AppError::validation("No audio provided"))?;
    let text = state
        .transcriber
        .transcribe(&audio)
        .await
        .ok_or_else(|| AppError::validation("Could not process audio"))?;
    Ok(Json(json!({ "text": text })))
}

pub async fn config(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

pub async fn history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Recent>, AppError> {
    let Query(query) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let limit = match query.limit {
        None => DEFAULT_HISTORY_LIMIT,
        Some(n) => usize::try_from(n)
            .map_err(|_| AppError::validation("limit must be a non-negative integer"))?,
    };
    Ok(Json(state.history.lock().await.recent(limit)))
}

pub async fn clear_history(State(state): State<AppState>) -> Json<Value> {
    state.chat.clear_history().await;
    info!("history cleared");
    Json(json!({ "message": "History cleared", "status": "success" }))
}

pub async fn summary(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "summary": state.chat.summary().await }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "app": state.info.app_name,
        "version": state.info.version,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_files = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(index))
        .route("/api/chat", post(chat))
        .route("/api/speech-to-text", post(speech_to_text))
        .route("/api/config", get(config))
        .route("/api/history", get(history))
        .route("/api/clear-history", post(clear_history))
        .route("/api/summary", get(summary))
        .route("/api/health", get(health))
        .nest_service("/static", static_files)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
