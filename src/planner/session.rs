//! Planning session state and the session manager.

use std::collections::HashMap;

use crate::types::{ChatTurn, ModelMessage};

/// Append-only conversation state for one planning session.
///
/// The planner takes a `&mut PlanningSession` per call, so session ownership
/// lives with the caller (normally a [`SessionManager`]) and single-writer
/// access is enforced by the borrow checker rather than by locks. History
/// grows monotonically; there is no trimming or expiry. Callers needing
/// bounded memory manage session lifecycle through the manager.
#[derive(Debug, Clone, Default)]
pub struct PlanningSession {
    messages: Vec<ModelMessage>,
}

impl PlanningSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append caller-supplied prior turns, converted into the two
    /// recognized conversational roles.
    pub fn append_turns(&mut self, turns: &[ChatTurn]) {
        self.messages.extend(turns.iter().map(ModelMessage::from));
    }

    /// Append an assistant answer.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ModelMessage::assistant(text));
    }

    /// The accumulated history, in insertion order.
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Owns planning sessions by ID. The planner never instantiates sessions
/// itself; it only borrows them for the duration of a call.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, PlanningSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a session by ID.
    pub fn get_or_create(&mut self, session_id: &str) -> &mut PlanningSession {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    /// Get an existing session.
    pub fn get(&self, session_id: &str) -> Option<&PlanningSession> {
        self.sessions.get(session_id)
    }

    /// Remove a session.
    pub fn remove(&mut self, session_id: &str) -> Option<PlanningSession> {
        self.sessions.remove(session_id)
    }

    /// List session IDs.
    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.keys().map(|k| k.as_str()).collect()
    }
}
