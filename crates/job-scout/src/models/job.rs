use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Text shown for any listing field the backend left out.
pub const MISSING_FIELD: &str = "N/A";

/// One scraped job posting. The backend enforces no schema, so every field
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_scraped: Option<u32>,
}

impl JobListing {
    /// Builds a listing from whatever JSON the tool returned. Fields of the
    /// wrong type are dropped instead of failing the whole listing.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return JobListing::default();
        };

        let text = |key: &str| match object.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };

        let page_scraped = match object.get("page_scraped").or_else(|| object.get("page")) {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        JobListing {
            title: text("title"),
            company: text("company"),
            location: text("location"),
            url: text("url"),
            page_scraped,
        }
    }

    pub fn title_or_missing(&self) -> &str {
        self.title.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn company_or_missing(&self) -> &str {
        self.company.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn location_or_missing(&self) -> &str {
        self.location.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn url_or_missing(&self) -> &str {
        self.url.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn page_or_missing(&self) -> String {
        self.page_scraped
            .map(|p| p.to_string())
            .unwrap_or_else(|| MISSING_FIELD.to_string())
    }
}
