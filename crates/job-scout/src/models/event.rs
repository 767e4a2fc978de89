use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role the backend assigns to text produced by the model.
pub const MODEL_ROLE: &str = "model";

/// One entry of the list returned by the backend's `/run` endpoint.
///
/// Only the fields the front-end reads are modelled; everything else the
/// backend sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<EventContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContent {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub response: Value,
}

/// What a part carries, as far as result extraction is concerned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartKind<'a> {
    FunctionResult { name: &'a str, payload: &'a Value },
    Text(&'a str),
    Other,
}

impl Part {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Part {
            text: Some(text.into()),
            function_response: None,
        }
    }

    pub fn function_result<S: Into<String>>(name: S, response: Value) -> Self {
        Part {
            text: None,
            function_response: Some(FunctionResponse {
                id: None,
                name: name.into(),
                response,
            }),
        }
    }

    pub fn kind(&self) -> PartKind<'_> {
        if let Some(function_response) = &self.function_response {
            PartKind::FunctionResult {
                name: &function_response.name,
                payload: &function_response.response,
            }
        } else if let Some(text) = &self.text {
            PartKind::Text(text)
        } else {
            PartKind::Other
        }
    }
}

impl AgentEvent {
    pub fn new<S: Into<String>>(role: S, parts: Vec<Part>) -> Self {
        AgentEvent {
            id: None,
            author: None,
            content: Some(EventContent {
                role: Some(role.into()),
                parts,
            }),
        }
    }

    /// Decodes one raw event. Records that do not look like an event are
    /// kept as events without content so that ordering is preserved.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!("Ignoring content of undecodable event: {}", e);
            AgentEvent::default()
        })
    }

    pub fn role(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.role.as_deref())
    }

    pub fn parts(&self) -> &[Part] {
        self.content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Part>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Part>>::deserialize(deserializer)?.unwrap_or_default())
}
