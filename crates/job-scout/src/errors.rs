use reqwest::StatusCode;
use thiserror::Error;

/// Placeholder shown when the agent produced no text alongside missing job data.
pub const NO_TEXT_RESPONSE: &str = "No text response";

/// Failures that end a single search attempt. The `Display` text of each
/// variant is the message shown to the user.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to create session: {0}")]
    SessionRejected(String),

    #[error("Network error while creating session: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to run agent: {status} {body}")]
    RunFailed { status: StatusCode, body: String },

    #[error("Failed to reach agent backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed agent response: {0}")]
    MalformedResponse(String),

    #[error("Error from agent tool: {}{}", .error, .details.as_deref().map(|d| format!(" - {}", d)).unwrap_or_default())]
    ToolError {
        error: String,
        details: Option<String>,
    },

    #[error("No job data found in agent response. Agent said: {}", .0.as_deref().unwrap_or(NO_TEXT_RESPONSE))]
    NoJobData(Option<String>),
}

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {env_var}: {message}")]
    InvalidEnvVar { env_var: String, message: String },

    #[error("Configuration error: {0}")]
    Other(#[from] ::config::ConfigError),
}

/// Maps a dotted configuration key to the environment variable that sets it.
pub fn to_env_var(field: &str) -> String {
    format!("JOB_SCOUT_{}", field.replace('.', "__").to_uppercase())
}
