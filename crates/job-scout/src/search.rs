use crate::backend::base::{AgentBackend, NewMessage, SessionRef};
use crate::config::BackendSettings;
use crate::errors::SearchResult;
use crate::extract::extract_jobs;
use crate::models::job::JobListing;
use crate::models::query::{Query, SessionId};

/// What the front-end shows for the latest search.
///
/// Each completed search overwrites the whole state. Results and error are
/// never set together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub loading: bool,
    pub error: Option<String>,
    pub results: Vec<JobListing>,
}

impl SearchState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.results.clear();
    }

    // Completions are applied in arrival order; a slow earlier search can
    // overwrite a newer one.
    pub fn finish(&mut self, outcome: SearchResult<Vec<JobListing>>) {
        self.loading = false;
        match outcome {
            Ok(results) => {
                self.error = None;
                self.results = results;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.results.clear();
            }
        }
    }
}

/// Runs job searches against an agent backend: establish a session, send
/// the query, extract listings.
pub struct Searcher<B: AgentBackend> {
    backend: B,
    settings: BackendSettings,
}

impl<B: AgentBackend> Searcher<B> {
    pub fn new(backend: B, settings: BackendSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    pub async fn search(&self, query: &Query) -> SearchResult<Vec<JobListing>> {
        let session_id = SessionId::generate();
        let session = SessionRef {
            app_name: &self.settings.app_name,
            user_id: &self.settings.user_id,
            session_id: &session_id,
        };

        self.backend.create_session(session).await?;

        tracing::info!(
            "Searching '{}' in '{}' ({} pages) with session {}",
            query.role,
            query.location,
            query.max_pages(),
            session_id
        );
        let events = self
            .backend
            .run(session, NewMessage::user(query.instruction()))
            .await?;

        extract_jobs(&events, &self.settings.tool_name)
    }

    pub async fn search_into(&self, query: &Query, state: &mut SearchState) {
        state.begin();
        let outcome = self.search(query).await;
        if let Err(e) = &outcome {
            tracing::debug!("Search failed: {}", e);
        }
        state.finish(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::errors::SearchError;
    use crate::models::event::{AgentEvent, Part};
    use serde_json::json;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn searcher(backend: MockBackend) -> Searcher<MockBackend> {
        Searcher::new(backend, BackendSettings::default())
    }

    #[tokio::test]
    async fn test_search_threads_one_session_through_both_calls() {
        let backend = MockBackend::with_events(vec![AgentEvent::new(
            "user",
            vec![Part::function_result(
                "find_jobs_on_simplyhired",
                json!([{"title": "A"}]),
            )],
        )]);
        let searcher = searcher(backend);

        let jobs = searcher
            .search(&Query::new("Engineer", "Remote", 2))
            .await
            .unwrap();
        assert_eq!(jobs[0].title.as_deref(), Some("A"));

        let sessions = searcher.backend.sessions.lock().unwrap().clone();
        let messages = searcher.backend.messages.lock().unwrap().clone();
        assert_eq!(sessions.len(), 1);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, sessions[0]);
        assert_eq!(
            messages[0].1,
            NewMessage::user("Find jobs for role 'Engineer' in 'Remote' scraping 2 pages.")
        );
    }

    #[tokio::test]
    async fn test_failed_session_skips_run() {
        let backend = MockBackend::new(
            Err(SearchError::SessionRejected("Internal Server Error".into())),
            Ok(vec![]),
        );
        let searcher = searcher(backend);

        let mut state = SearchState::default();
        searcher
            .search_into(&Query::new("Engineer", "Remote", 1), &mut state)
            .await;

        assert!(searcher.backend.messages.lock().unwrap().is_empty());
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to create session: Internal Server Error")
        );
        assert!(state.results.is_empty());
    }

    #[derive(Clone, Default)]
    struct SharedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_search_is_not_logged_at_warn() {
        let log = SharedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let searcher = searcher(MockBackend::with_events(vec![]));
        let mut state = SearchState::default();
        searcher
            .search_into(&Query::new("Engineer", "Remote", 1), &mut state)
            .await;

        assert!(state.error.is_some());
        assert!(log.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_state_transitions() {
        let mut state = SearchState::default();
        state.finish(Ok(vec![JobListing::default()]));
        assert_eq!(state.results.len(), 1);

        state.begin();
        assert!(state.loading);
        assert!(state.results.is_empty());
        assert!(state.error.is_none());

        state.finish(Err(SearchError::NoJobData(None)));
        assert!(!state.loading);
        assert!(state.results.is_empty());
        assert!(state.error.is_some());

        state.begin();
        state.finish(Ok(vec![]));
        assert!(state.error.is_none());
    }
}
