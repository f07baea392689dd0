//! Single-call wrapper around an OpenAI-compatible `chat/completions` API.
//!
//! Each [`ChatBackend::send`] turns a slice of [`ChatTurn`]s into exactly one
//! assistant turn. No retry, no streaming, no backoff: failures are returned
//! to the caller as a [`ChatError`].

use std::error::Error;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{ChatCompletionResponse, ChatMessage, ChatRequest};
use crate::core::config::Config;
use crate::core::message::ChatTurn;
use crate::utils::url::construct_api_url;

/// Which turns of a session are forwarded with each request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryMode {
    /// Only the newest human turn is sent; replies carry no prior context.
    #[default]
    LatestOnly,
    /// The whole session history is sent so replies can refer back.
    FullHistory,
}

impl HistoryMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryMode::LatestOnly => "latest-only",
            HistoryMode::FullHistory => "full-history",
        }
    }

    /// Pick the turns that go on the wire.
    pub fn select(self, turns: &[ChatTurn]) -> Vec<ChatMessage> {
        match self {
            HistoryMode::LatestOnly => turns
                .iter()
                .rev()
                .find(|turn| turn.is_human())
                .map(ChatMessage::from)
                .into_iter()
                .collect(),
            HistoryMode::FullHistory => turns.iter().map(ChatMessage::from).collect(),
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum ChatError {
    /// The credential variable was unset or empty when a request was attempted.
    MissingCredential { var: String },
    /// Nothing selected to send (no human turn present).
    EmptyRequest,
    /// Connection, TLS, timeout or body-read failure.
    Transport(reqwest::Error),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The API answered 2xx but the body was not a usable completion.
    MalformedResponse(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::MissingCredential { var } => {
                write!(f, "{var} environment variable not set")
            }
            ChatError::EmptyRequest => write!(f, "No message to send"),
            ChatError::Transport(err) => write!(f, "Request failed: {err}"),
            ChatError::Api { status, message } => write!(f, "API Error ({status}): {message}"),
            ChatError::MalformedResponse(detail) => write!(f, "Malformed API response: {detail}"),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChatError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err)
    }
}

/// Anything that can turn a conversation into one assistant reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, turns: &[ChatTurn]) -> Result<ChatTurn, ChatError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Read the key from this environment variable at request time.
    Env(String),
    /// Use this key directly.
    Key(String),
}

impl Credential {
    fn resolve(&self) -> Result<String, ChatError> {
        match self {
            Credential::Key(key) => Ok(key.clone()),
            Credential::Env(var) => std::env::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ChatError::MissingCredential { var: var.clone() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub model: String,
    pub credential: Credential,
    pub history_mode: HistoryMode,
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            credential: Credential::Env(config.api_key_env().to_string()),
            history_mode: config.history_mode(),
            timeout: config.request_timeout(),
        }
    }
}

pub struct CompletionClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl CompletionClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            settings,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn build_request(&self, turns: &[ChatTurn]) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: self.settings.history_mode.select(turns),
            stream: false,
        }
    }
}

#[async_trait]
impl ChatBackend for CompletionClient {
    async fn send(&self, turns: &[ChatTurn]) -> Result<ChatTurn, ChatError> {
        let api_key = self.settings.credential.resolve()?;
        let request = self.build_request(turns);
        if request.messages.is_empty() {
            return Err(ChatError::EmptyRequest);
        }

        let url = construct_api_url(&self.settings.base_url, "chat/completions");
        info!(
            model = %request.model,
            messages = request.messages.len(),
            history_mode = %self.settings.history_mode,
            "sending chat completion request"
        );

        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = summarize_api_error(&body);
            warn!(status = status.as_u16(), %message, "chat completion failed");
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|err| ChatError::MalformedResponse(err.to_string()))?;
        let content = parsed
            .first_content()
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".to_string()))?;
        debug!(
            chars = content.len(),
            model = ?parsed.model,
            finish_reason = ?parsed.finish_reason(),
            "received completion"
        );
        Ok(ChatTurn::assistant(content))
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// One-line description of an error body, preferring the provider's own message.
fn summarize_api_error(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| extract_error_summary(&value))
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests;
