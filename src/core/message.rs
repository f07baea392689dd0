pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One message in a conversation.
///
/// Turns are immutable once created: the only ways a transcript changes are
/// appending a new turn or resetting the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTurn {
    Human(String),
    Assistant(String),
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    Human,
    Assistant,
}

impl ChatTurn {
    pub fn human(content: impl Into<String>) -> Self {
        ChatTurn::Human(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatTurn::Assistant(content.into())
    }

    pub fn speaker(&self) -> Speaker {
        match self {
            ChatTurn::Human(_) => Speaker::Human,
            ChatTurn::Assistant(_) => Speaker::Assistant,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ChatTurn::Human(text) | ChatTurn::Assistant(text) => text,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, ChatTurn::Human(_))
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, ChatTurn::Assistant(_))
    }
}

impl Speaker {
    /// Role string used by OpenAI-compatible chat endpoints.
    pub fn api_role(self) -> &'static str {
        match self {
            Speaker::Human => ROLE_USER,
            Speaker::Assistant => ROLE_ASSISTANT,
        }
    }

    /// Label shown in front of the turn in the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Human => "You",
            Speaker::Assistant => "Chatbot",
        }
    }
}
