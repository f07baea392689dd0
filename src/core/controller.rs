//! Conversation state machine driven by discrete UI events.
//!
//! The controller owns the session store and the chat backend, plus the
//! view-local state (current session id, pending input, phase and the last
//! notice). Every interaction is one call to [`ChatController::handle`]; the
//! caller redraws from [`ChatController::view`] and
//! [`ChatController::transcript`] afterwards.

use tracing::{debug, info};

use crate::core::chat_client::{ChatBackend, ChatError};
use crate::core::history::{SessionId, SessionRepository};
use crate::core::message::ChatTurn;

pub const EMPTY_INPUT_WARNING: &str = "Please enter a message.";
pub const HISTORY_CLEARED: &str = "Session history cleared.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Message input and Send are available.
    #[default]
    Composing,
    /// A reply arrived; the user picks "Continue Chat" or "Clear History".
    AwaitingContinueDecision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Warning(text) | Notice::Success(text) | Notice::Error(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    EditSessionId(String),
    EditInput(String),
    Send,
    ContinueChat,
    ClearHistory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub session_id: SessionId,
    pub input: String,
    pub phase: Phase,
    pub notice: Option<Notice>,
}

impl ViewState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            input: String::new(),
            phase: Phase::Composing,
            notice: None,
        }
    }

    pub fn awaiting_continue_decision(&self) -> bool {
        self.phase == Phase::AwaitingContinueDecision
    }
}

pub struct ChatController<R, B> {
    store: R,
    backend: B,
    view: ViewState,
}

impl<R, B> ChatController<R, B>
where
    R: SessionRepository,
    B: ChatBackend,
{
    pub fn new(store: R, backend: B, session_id: SessionId) -> Self {
        Self {
            store,
            backend,
            view: ViewState::new(session_id),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Turns of the current session, oldest first.
    pub fn transcript(&self) -> &[ChatTurn] {
        self.store
            .history(&self.view.session_id)
            .map(|history| history.turns())
            .unwrap_or(&[])
    }

    /// Awaiting a decision with nothing left to show.
    pub fn shows_farewell(&self) -> bool {
        self.view.awaiting_continue_decision() && self.transcript().is_empty()
    }

    /// Apply one interaction. Errors from the backend are returned after the
    /// human turn has already been recorded.
    pub async fn handle(&mut self, event: UiEvent) -> Result<(), ChatError> {
        self.view.notice = None;
        match event {
            UiEvent::EditSessionId(id) => {
                self.switch_session(id);
                Ok(())
            }
            UiEvent::EditInput(text) => {
                self.view.input = text;
                Ok(())
            }
            UiEvent::Send => self.send().await,
            UiEvent::ContinueChat => {
                self.continue_chat();
                Ok(())
            }
            UiEvent::ClearHistory => {
                self.clear_history();
                Ok(())
            }
        }
    }

    /// A pending Continue/Clear decision belongs to the session that
    /// produced it, so switching away closes it.
    fn switch_session(&mut self, id: String) {
        let id = SessionId::from(id);
        if id != self.view.session_id {
            info!(from = %self.view.session_id, to = %id, "switching session");
            self.view.session_id = id;
            self.view.phase = Phase::Composing;
        }
    }

    async fn send(&mut self) -> Result<(), ChatError> {
        if self.view.awaiting_continue_decision() {
            debug!("send ignored while awaiting continue decision");
            return Ok(());
        }
        if self.view.input.is_empty() {
            self.view.notice = Some(Notice::Warning(EMPTY_INPUT_WARNING.to_string()));
            return Ok(());
        }

        let history = self.store.get_or_create(&self.view.session_id);
        history.push(ChatTurn::human(self.view.input.clone()));
        debug!(session = %self.view.session_id, turns = history.len(), "appended human turn");

        let reply = match self.backend.send(history.turns()).await {
            Ok(reply) => reply,
            Err(err) => {
                self.view.notice = Some(Notice::Error(format!("Something went wrong: {err}")));
                return Err(err);
            }
        };
        self.store.get_or_create(&self.view.session_id).push(reply);
        self.view.phase = Phase::AwaitingContinueDecision;
        Ok(())
    }

    fn continue_chat(&mut self) {
        self.view.phase = Phase::Composing;
        self.view.input.clear();
    }

    fn clear_history(&mut self) {
        self.store.reset(&self.view.session_id);
        info!(session = %self.view.session_id, "cleared session history");
        self.view.phase = Phase::Composing;
        self.view.input.clear();
        self.view.notice = Some(Notice::Success(HISTORY_CLEARED.to_string()));
    }
}
