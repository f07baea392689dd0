//! Per-session chat history kept in process memory.
//!
//! A [`SessionRepository`] maps a user-chosen [`SessionId`] to the ordered
//! list of turns exchanged in that session. Histories are created lazily on
//! first access and are never evicted; nothing is persisted.

use std::collections::HashMap;
use std::fmt;

use crate::core::message::ChatTurn;

pub const DEFAULT_SESSION_ID: &str = "chat1";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_ID)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered, append-only sequence of turns for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHistory {
    turns: Vec<ChatTurn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a SessionHistory {
    type Item = &'a ChatTurn;
    type IntoIter = std::slice::Iter<'a, ChatTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// Storage seam for session histories.
///
/// The store is owned by whoever drives the conversation; there is no
/// internal locking, so callers serialize access through `&mut self`.
pub trait SessionRepository {
    /// Return the history for `id`, creating an empty one on first access.
    fn get_or_create(&mut self, id: &SessionId) -> &mut SessionHistory;

    /// Look up a history without creating it.
    fn history(&self, id: &SessionId) -> Option<&SessionHistory>;

    /// Replace the history for `id` with an empty sequence.
    fn reset(&mut self, id: &SessionId);

    /// Known session ids in sorted order.
    fn session_ids(&self) -> Vec<SessionId>;
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    sessions: HashMap<SessionId, SessionHistory>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionRepository for InMemoryHistoryStore {
    fn get_or_create(&mut self, id: &SessionId) -> &mut SessionHistory {
        self.sessions.entry(id.clone()).or_default()
    }

    fn history(&self, id: &SessionId) -> Option<&SessionHistory> {
        self.sessions.get(id)
    }

    fn reset(&mut self, id: &SessionId) {
        self.sessions.insert(id.clone(), SessionHistory::new());
    }

    fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.keys().cloned().collect();
        ids.sort();
        ids
    }
}
