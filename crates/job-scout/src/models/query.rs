use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_LOCATION: &str = "United States";

/// A job search as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub role: String,
    pub location: String,
    max_pages: u32,
}

impl Query {
    pub fn new<R: Into<String>, L: Into<String>>(role: R, location: L, max_pages: u32) -> Self {
        Self {
            role: role.into(),
            location: location.into(),
            max_pages: max_pages.max(1),
        }
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn set_max_pages(&mut self, max_pages: u32) {
        self.max_pages = max_pages.max(1);
    }

    /// The natural-language instruction sent to the agent.
    pub fn instruction(&self) -> String {
        format!(
            "Find jobs for role '{}' in '{}' scraping {} pages.",
            self.role, self.location, self.max_pages
        )
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new("", DEFAULT_LOCATION, 1)
    }
}

/// Coerces free-form page count input. Anything that is not a positive
/// integer becomes 1.
pub fn parse_max_pages(input: &str) -> u32 {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identifier of one backend session. A fresh one is generated for every
/// search and never shared between searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        // The sequence number keeps ids from the same millisecond apart.
        let sequence = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!(
            "session-{}-{}",
            Utc::now().timestamp_millis(),
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
