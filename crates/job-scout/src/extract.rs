use serde_json::Value;

use crate::errors::{SearchError, SearchResult};
use crate::models::event::{AgentEvent, PartKind, MODEL_ROLE};
use crate::models::job::JobListing;
use crate::models::payload::Payload;

/// What a pass over the agent's events found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    /// Payload of the first function result named after the job tool.
    pub payload: Option<Payload>,
    /// Last text the model produced before the scan ended.
    pub fallback_text: Option<String>,
}

/// Walks events and their parts in order. The first function result from
/// `tool_name` ends the walk; model text seen along the way replaces any
/// earlier fallback text.
pub fn scan(events: &[AgentEvent], tool_name: &str) -> Scan {
    let mut found = Scan::default();

    'events: for event in events {
        let is_model = event.role() == Some(MODEL_ROLE);
        for part in event.parts() {
            match part.kind() {
                PartKind::FunctionResult { name, payload } if name == tool_name => {
                    tracing::debug!("Found result of {} in event {:?}", name, event.id);
                    found.payload = Some(Payload::from_value(payload.clone()));
                    break 'events;
                }
                PartKind::Text(text) if is_model => {
                    found.fallback_text = Some(text.to_string());
                }
                _ => {}
            }
        }
    }

    found
}

/// Turns a scan into job listings or the error to show instead.
pub fn resolve(scan: Scan) -> SearchResult<Vec<JobListing>> {
    let payload = match scan.payload {
        Some(payload) if !payload.is_null() => payload,
        _ => return Err(SearchError::NoJobData(scan.fallback_text)),
    };

    if let Payload::Array(items) = &payload {
        if let Some(error) = items.first().and_then(tool_error) {
            return Err(error);
        }
    }

    Ok(payload
        .into_items()
        .iter()
        .map(JobListing::from_value)
        .collect())
}

/// Reads the `{error, details}` object the tool returns when scraping fails.
fn tool_error(item: &Value) -> Option<SearchError> {
    let object = item.as_object()?;
    let error = object.get("error").filter(|e| is_set(e))?;
    let details = object
        .get("details")
        .filter(|d| is_set(d))
        .map(value_text);

    Some(SearchError::ToolError {
        error: value_text(error),
        details,
    })
}

/// Whether a field carries a value, treating null, false, zero and empty
/// strings or collections as unset.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extracts listings from an event list in one step.
pub fn extract_jobs(events: &[AgentEvent], tool_name: &str) -> SearchResult<Vec<JobListing>> {
    let found = scan(events, tool_name);
    tracing::debug!(
        "Scan finished: payload found = {}, fallback text = {}",
        found.payload.is_some(),
        found.fallback_text.is_some()
    );
    resolve(found)
}
