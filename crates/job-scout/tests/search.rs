use job_scout::backend::http::HttpAgentBackend;
use job_scout::config::BackendSettings;
use job_scout::models::query::{parse_max_pages, Query};
use job_scout::search::{SearchState, Searcher};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_PATH: &str = r"^/apps/adk-backend/users/user/sessions/session-\d+-\d+$";

/// Harness wiring a `Searcher` to a mock agent backend.
struct BackendTester {
    server: MockServer,
    searcher: Searcher<HttpAgentBackend>,
}

impl BackendTester {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let settings = BackendSettings {
            base_url: server.uri(),
            ..BackendSettings::default()
        };
        let backend = HttpAgentBackend::new(&settings).unwrap();
        Self {
            server,
            searcher: Searcher::new(backend, settings),
        }
    }

    async fn session_responds(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(SESSION_PATH))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"id": "session-from-backend"})),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    async fn run_responds(&self, events: Value, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/run"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    async fn search(&self, query: Query) -> SearchState {
        let mut state = SearchState::default();
        self.searcher.search_into(&query, &mut state).await;
        assert!(!state.loading);
        state
    }
}

fn query() -> Query {
    Query::new("Software Engineer", "New York, NY", 1)
}

fn tool_event(payload: Value) -> Value {
    json!({
        "author": "job_search_agent",
        "content": {
            "role": "user",
            "parts": [{"functionResponse": {"name": "find_jobs_on_simplyhired", "response": payload}}]
        }
    })
}

fn text_event(text: &str) -> Value {
    json!({"author": "job_search_agent", "content": {"role": "model", "parts": [{"text": text}]}})
}

#[tokio::test]
async fn test_instruction_sent_with_coerced_page_count() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .and(body_partial_json(json!({
            "appName": "adk-backend",
            "userId": "user",
            "newMessage": {
                "role": "user",
                "parts": [{"text": "Find jobs for role 'Software Engineer' in 'New York, NY' scraping 1 pages."}]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([tool_event(json!([]))])))
        .expect(1)
        .mount(&tester.server)
        .await;

    let query = Query::new("Software Engineer", "New York, NY", parse_max_pages("lots"));
    let state = tester.search(query).await;
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_existing_session_continues_to_run() {
    let tester = BackendTester::new().await;
    tester.session_responds(409).await;
    tester
        .run_responds(json!([tool_event(json!([{"title": "A"}]))]), 1)
        .await;

    let state = tester.search(query()).await;
    assert_eq!(state.error, None);
    assert_eq!(state.results.len(), 1);
}

#[tokio::test]
async fn test_session_failure_halts_before_run() {
    let tester = BackendTester::new().await;
    tester.session_responds(500).await;
    tester.run_responds(json!([]), 0).await;

    let state = tester.search(query()).await;
    assert!(state.results.is_empty());
    assert!(state
        .error
        .unwrap()
        .starts_with("Failed to create session: "));
}

#[tokio::test]
async fn test_structured_result_ignores_earlier_text() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    tester
        .run_responds(
            json!([text_event("Searching now."), tool_event(json!([{"title": "A"}]))]),
            1,
        )
        .await;

    let state = tester.search(query()).await;
    assert_eq!(state.error, None);
    assert_eq!(
        serde_json::to_value(&state.results).unwrap(),
        json!([{"title": "A"}])
    );
}

#[tokio::test]
async fn test_tool_error_clears_results() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    tester
        .run_responds(
            json!([tool_event(json!([{"error": "quota exceeded", "details": "try later"}]))]),
            1,
        )
        .await;

    let state = tester.search(query()).await;
    assert_eq!(
        state.error.as_deref(),
        Some("Error from agent tool: quota exceeded - try later")
    );
    assert!(state.results.is_empty());
}

#[tokio::test]
async fn test_text_only_response_is_an_error() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    tester
        .run_responds(json!([text_event("Sorry, no jobs.")]), 1)
        .await;

    let state = tester.search(query()).await;
    assert_eq!(
        state.error.as_deref(),
        Some("No job data found in agent response. Agent said: Sorry, no jobs.")
    );
}

#[tokio::test]
async fn test_single_object_payload_becomes_list() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    tester
        .run_responds(json!([tool_event(json!({"title": "Solo"}))]), 1)
        .await;

    let state = tester.search(query()).await;
    assert_eq!(
        serde_json::to_value(&state.results).unwrap(),
        json!([{"title": "Solo"}])
    );
}

#[tokio::test]
async fn test_run_failure_is_reported() {
    let tester = BackendTester::new().await;
    tester.session_responds(200).await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&tester.server)
        .await;

    let state = tester.search(query()).await;
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to run agent: 503 Service Unavailable model overloaded")
    );
}
