use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::chat_client::HistoryMode;

/// On-disk configuration. Every field is optional; unset values fall back
/// to the defaults in [`crate::core::config::defaults`].
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Model identifier sent with every completion request
    pub model: Option<String>,
    /// Base URL of an OpenAI-compatible API (e.g., "https://api.groq.com/openai/v1")
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Session id pre-filled in the session field at startup
    pub default_session: Option<String>,
    /// Whether requests carry only the newest turn or the whole session
    pub history_mode: Option<HistoryMode>,
    /// Per-request timeout in seconds; unset means wait indefinitely
    pub request_timeout_secs: Option<u64>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
