//! Service client configuration

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::DataError;

/// Configuration file looked up next to the working directory (any
/// extension the `config` crate understands)
pub const CONFIG_FILE: &str = "querychart";

/// Prefix of environment overrides, e.g. `QUERYCHART_API_URL`
pub const ENV_PREFIX: &str = "QUERYCHART";

/// Where and how to reach the query service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service, without the `/api` suffix
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Load from the default file and the environment
    pub fn load() -> Result<Self, DataError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from `file` (optional) with environment overrides on top
    pub fn load_from(file: &str) -> Result<Self, DataError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(file).required(false))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        tracing::debug!("Using query service at {}", config.api_url);
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of an API route, e.g. `endpoint("query")`
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/api/{}", self.api_url.trim_end_matches('/'), route.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ClientConfig::load_from("does-not-exist/querychart").unwrap();
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint() {
        let config = ClientConfig::default().with_api_url("http://localhost:9000/");
        assert_eq!(config.endpoint("query"), "http://localhost:9000/api/query");
        assert_eq!(config.endpoint("/upload"), "http://localhost:9000/api/upload");
    }
}
