use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shici_transport::HttpTransport;

use crate::error::SearchError;

pub const URL_VAR: &str = "SHICI_ES_URL";
pub const TIMEOUT_VAR: &str = "SHICI_ES_TIMEOUT_SECS";
pub const MIN_SCORE_VAR: &str = "SHICI_MIN_SCORE";

/// Connection and scoring settings for the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Engine base URL; request paths are appended to it.
    #[serde(default = "default_url")]
    pub url: String,

    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Hits scoring at or below this are dropped from search results.
    #[serde(default)]
    pub min_score: f64,
}

fn default_url() -> String {
    "http://localhost:9200/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            min_score: 0.0,
        }
    }
}

impl SearchConfig {
    /// Read settings from `SHICI_ES_URL`, `SHICI_ES_TIMEOUT_SECS` and
    /// `SHICI_MIN_SCORE`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, SearchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SearchConfig::from_env`], with variables resolved by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(URL_VAR) {
            config.url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|e| SearchError::Config(format!("{TIMEOUT_VAR}={raw:?}: {e}")))?;
        }
        if let Some(raw) = lookup(MIN_SCORE_VAR) {
            config.min_score = raw
                .trim()
                .parse()
                .map_err(|e| SearchError::Config(format!("{MIN_SCORE_VAR}={raw:?}: {e}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        let config: SearchConfig = serde_json::from_str(&contents).map_err(|e| {
            SearchError::Config(format!("failed to parse config at {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(SearchError::Config(format!(
                "engine URL must be http(s): {:?}",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SearchError::Config("timeout must be at least 1 second".to_string()));
        }
        if !self.min_score.is_finite() {
            return Err(SearchError::Config(format!(
                "min score must be finite, got {}",
                self.min_score
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP transport for the configured engine.
    pub fn build_transport(&self) -> Result<HttpTransport, SearchError> {
        Ok(HttpTransport::new(&self.url, self.timeout())?)
    }
}
