use std::time::Duration;

use crate::core::chat_client::HistoryMode;
use crate::core::config::data::Config;
use crate::core::history::DEFAULT_SESSION_ID;

pub const DEFAULT_MODEL: &str = "gemma2-9b-it";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

impl Config {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    pub fn default_session(&self) -> &str {
        self.default_session
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.history_mode.unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// A config with every default written out, used by `config --init`.
    pub fn with_defaults() -> Self {
        Config {
            model: Some(DEFAULT_MODEL.to_string()),
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            default_session: Some(DEFAULT_SESSION_ID.to_string()),
            history_mode: Some(HistoryMode::default()),
            request_timeout_secs: None,
        }
    }
}
