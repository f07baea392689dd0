//! Terminal-only presentation state that the controller does not track.

use crate::core::controller::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    SessionId,
    #[default]
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionButton {
    #[default]
    ContinueChat,
    ClearHistory,
}

impl DecisionButton {
    pub fn toggle(self) -> Self {
        match self {
            DecisionButton::ContinueChat => DecisionButton::ClearHistory,
            DecisionButton::ClearHistory => DecisionButton::ContinueChat,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DecisionButton::ContinueChat => "Continue Chat",
            DecisionButton::ClearHistory => "Clear History",
        }
    }

    pub fn event(self) -> UiEvent {
        match self {
            DecisionButton::ContinueChat => UiEvent::ContinueChat,
            DecisionButton::ClearHistory => UiEvent::ClearHistory,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub focus: Focus,
    /// Session id being typed; committed to the controller on Enter or Tab.
    pub session_draft: String,
    pub selected_button: DecisionButton,
    /// Rows scrolled up from the bottom of the transcript.
    pub scroll_back: u16,
    /// Furthest `scroll_back` can go, as of the last frame drawn.
    pub max_scroll: u16,
    /// A request is in flight.
    pub waiting: bool,
}

impl ScreenState {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_draft: session_id.to_string(),
            ..Default::default()
        }
    }
}
