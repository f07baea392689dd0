use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::chat_client::{ChatBackend, ChatError};
use crate::core::controller::{ChatController, UiEvent};
use crate::core::history::{InMemoryHistoryStore, SessionId};
use crate::core::message::ChatTurn;

/// Backend that answers "reply N" for the N-th call and records every
/// turn slice it was handed.
#[derive(Default)]
pub struct ScriptedBackend {
    pub calls: Mutex<Vec<Vec<ChatTurn>>>,
    fail_next: Mutex<bool>,
}

impl ScriptedBackend {
    pub fn failing_once() -> Self {
        Self {
            fail_next: Mutex::new(true),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, turns: &[ChatTurn]) -> Result<ChatTurn, ChatError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(turns.to_vec());
        let mut fail_next = self.fail_next.lock().unwrap();
        if *fail_next {
            *fail_next = false;
            return Err(ChatError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(ChatTurn::assistant(format!("reply {}", calls.len())))
    }
}

pub type TestController = ChatController<InMemoryHistoryStore, ScriptedBackend>;

pub fn create_test_controller(backend: ScriptedBackend) -> TestController {
    ChatController::new(InMemoryHistoryStore::new(), backend, SessionId::default())
}

/// Type `text` into the composer and press Send.
pub async fn send_message(controller: &mut TestController, text: &str) -> Result<(), ChatError> {
    controller
        .handle(UiEvent::EditInput(text.to_string()))
        .await?;
    controller.handle(UiEvent::Send).await
}
