use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::{json, Value};

use super::base::{AgentBackend, NewMessage, SessionRef};
use crate::config::BackendSettings;
use crate::errors::{SearchError, SearchResult};
use crate::models::event::AgentEvent;

/// Talks to the agent backend's REST API.
pub struct HttpAgentBackend {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunRequest<'a> {
    app_name: &'a str,
    user_id: &'a str,
    session_id: &'a str,
    new_message: NewMessage,
}

impl HttpAgentBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        let base_url = Url::parse(&settings.base_url)?;
        if base_url.cannot_be_a_base() {
            bail!("Backend URL {} cannot have a path", settings.base_url);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: `new` rejects URLs that cannot be a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn session_url(&self, session: &SessionRef<'_>) -> Url {
        self.endpoint(&[
            "apps",
            session.app_name,
            "users",
            session.user_id,
            "sessions",
            session.session_id.as_str(),
        ])
    }
}

/// Human readable reason for a rejected request: the body's `detail` field
/// when present, otherwise the status text.
fn rejection_reason(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .filter(|d| !d.is_null());

    match detail {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string()),
    }
}

#[async_trait]
impl AgentBackend for HttpAgentBackend {
    async fn create_session(&self, session: SessionRef<'_>) -> SearchResult<()> {
        let url = self.session_url(&session);
        tracing::debug!("Creating session {} at {}", session.session_id, url);

        let response = self
            .client
            .post(url)
            .json(&json!({ "state": {} }))
            .send()
            .await
            .map_err(SearchError::Network)?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            tracing::info!("Session {} already exists, reusing it", session.session_id);
            return Ok(());
        }

        let body = response.text().await.map_err(SearchError::Network)?;
        if status.is_success() {
            let id = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_str).map(str::to_string));
            tracing::info!(
                "Session created: {}",
                id.as_deref().unwrap_or(session.session_id.as_str())
            );
            return Ok(());
        }

        tracing::warn!("Session creation rejected with status {}", status);
        Err(SearchError::SessionRejected(rejection_reason(status, &body)))
    }

    async fn run(
        &self,
        session: SessionRef<'_>,
        message: NewMessage,
    ) -> SearchResult<Vec<AgentEvent>> {
        let url = self.endpoint(&["run"]);
        let payload = RunRequest {
            app_name: session.app_name,
            user_id: session.user_id,
            session_id: session.session_id.as_str(),
            new_message: message,
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(SearchError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SearchError::Transport)?;
        if !status.is_success() {
            tracing::warn!("Agent run failed with status {}", status);
            return Err(SearchError::RunFailed { status, body });
        }

        let events = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(events)) => events,
            Ok(other) => {
                return Err(SearchError::MalformedResponse(format!(
                    "expected a list of events, got {}",
                    other
                )))
            }
            Err(e) => return Err(SearchError::MalformedResponse(e.to_string())),
        };

        tracing::debug!("Agent returned {} events", events.len());
        Ok(events.into_iter().map(AgentEvent::from_value).collect())
    }
}
