use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user message paired with the reply that was shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "user")]
    pub user_text: String,
    #[serde(rename = "ai")]
    pub ai_text: String,
    pub language: String,
}

impl Exchange {
    /// Record an exchange stamped with the current time.
    pub fn new(
        user_text: impl Into<String>,
        ai_text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::at(Utc::now(), user_text, ai_text, language)
    }

    /// Record an exchange with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        user_text: impl Into<String>,
        ai_text: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            user_text: user_text.into(),
            ai_text: ai_text.into(),
            language: language.into(),
        }
    }
}
