use crate::errors::{to_env_var, ConfigError};
use ::config::{Config, Environment};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_APP_NAME: &str = "adk-backend";
pub const DEFAULT_USER_ID: &str = "user";
/// Tool the backend must name when it returns structured job data.
pub const DEFAULT_TOOL_NAME: &str = "find_jobs_on_simplyhired";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl BackendSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_name: default_app_name(),
            user_id: default_user_id(),
            tool_name: default_tool_name(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("backend.base_url", default_base_url())?
            .set_default("backend.app_name", default_app_name())?
            .set_default("backend.user_id", default_user_id())?
            .set_default("backend.tool_name", default_tool_name())?
            .add_source(
                Environment::with_prefix("JOB_SCOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);
                match &err {
                    ::config::ConfigError::Type {
                        key: Some(key),
                        unexpected,
                        expected,
                        ..
                    } => Err(ConfigError::InvalidEnvVar {
                        env_var: to_env_var(key),
                        message: format!("found {}, expected {}", unexpected, expected),
                    }),
                    _ => Err(ConfigError::Other(err)),
                }
            }
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_tool_name() -> String {
    DEFAULT_TOOL_NAME.to_string()
}
