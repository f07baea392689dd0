//! TUI-less "say" command

use std::error::Error;

use crate::core::chat_client::{ChatBackend, ClientSettings, CompletionClient};
use crate::core::config::Config;
use crate::core::controller::{ChatController, UiEvent};
use crate::core::history::{InMemoryHistoryStore, SessionId};
use crate::core::message::ChatTurn;

pub async fn run_say(prompt: Vec<String>, config: &Config) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.is_empty() {
        eprintln!("Usage: sessionchat say <prompt>");
        std::process::exit(1);
    }

    let client = CompletionClient::new(ClientSettings::from_config(config))?;
    let reply = say_once(client, SessionId::from(config.default_session()), &prompt).await?;
    println!("{}", reply.text());
    Ok(())
}

/// Run one Send through a fresh controller and return the assistant turn.
pub async fn say_once<B: ChatBackend>(
    backend: B,
    session_id: SessionId,
    prompt: &str,
) -> Result<ChatTurn, Box<dyn Error>> {
    let mut controller = ChatController::new(InMemoryHistoryStore::new(), backend, session_id);
    controller
        .handle(UiEvent::EditInput(prompt.to_string()))
        .await?;
    controller.handle(UiEvent::Send).await?;

    if let Some(notice) = &controller.view().notice {
        return Err(notice.text().to_string().into());
    }
    controller
        .transcript()
        .last()
        .filter(|turn| turn.is_assistant())
        .cloned()
        .ok_or_else(|| "no reply received".into())
}
