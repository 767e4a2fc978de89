use async_trait::async_trait;
use serde::Serialize;

use crate::errors::SearchResult;
use crate::models::event::AgentEvent;
use crate::models::query::SessionId;

/// Identifies the conversation a request belongs to.
#[derive(Debug, Clone, Copy)]
pub struct SessionRef<'a> {
    pub app_name: &'a str,
    pub user_id: &'a str,
    pub session_id: &'a SessionId,
}

/// A message sent to the agent within a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub role: String,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPart {
    pub text: String,
}

impl NewMessage {
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![TextPart { text: text.into() }],
        }
    }
}

/// Transport to an agent-execution backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Registers the session with the backend. A session that already
    /// exists counts as created.
    async fn create_session(&self, session: SessionRef<'_>) -> SearchResult<()>;

    /// Sends one message in an established session and returns the events
    /// the agent produced, in order.
    async fn run(&self, session: SessionRef<'_>, message: NewMessage)
        -> SearchResult<Vec<AgentEvent>>;
}
