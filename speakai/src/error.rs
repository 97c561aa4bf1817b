use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm::LLMError;
use thiserror::Error;
use tracing::error;

/// Failures surfaced to HTTP clients as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-correctable input problem.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// The language model could not be reached or answered badly.
    #[error(transparent)]
    Upstream(#[from] LLMError),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
