use async_trait::async_trait;
use std::sync::Mutex;

use super::base::{AgentBackend, NewMessage, SessionRef};
use crate::errors::SearchResult;
use crate::models::event::AgentEvent;

/// A backend that replays pre-configured outcomes and records what it was sent.
pub struct MockBackend {
    session_outcome: Mutex<Option<SearchResult<()>>>,
    run_outcome: Mutex<Option<SearchResult<Vec<AgentEvent>>>>,
    pub sessions: Mutex<Vec<String>>,
    pub messages: Mutex<Vec<(String, NewMessage)>>,
}

impl MockBackend {
    pub fn new(
        session_outcome: SearchResult<()>,
        run_outcome: SearchResult<Vec<AgentEvent>>,
    ) -> Self {
        Self {
            session_outcome: Mutex::new(Some(session_outcome)),
            run_outcome: Mutex::new(Some(run_outcome)),
            sessions: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(events: Vec<AgentEvent>) -> Self {
        Self::new(Ok(()), Ok(events))
    }
}

#[async_trait]
impl AgentBackend for MockBackend {
    async fn create_session(&self, session: SessionRef<'_>) -> SearchResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .push(session.session_id.to_string());
        self.session_outcome.lock().unwrap().take().unwrap_or(Ok(()))
    }

    async fn run(
        &self,
        session: SessionRef<'_>,
        message: NewMessage,
    ) -> SearchResult<Vec<AgentEvent>> {
        self.messages
            .lock()
            .unwrap()
            .push((session.session_id.to_string(), message));
        self.run_outcome
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
