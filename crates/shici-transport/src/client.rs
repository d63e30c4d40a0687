use std::time::Duration;

use tracing::{debug, info};
use ureq::Agent;

use crate::error::TransportError;
use crate::request::{Method, RawResponse, Transport};

const JSON_CONTENT_TYPE: &str = "application/json";

/// `Transport` backed by a shared `ureq` agent.
///
/// The agent pools connections, so one `HttpTransport` should be built at
/// startup and shared.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the engine at `base_url`.
    ///
    /// `timeout` bounds each whole request (connect, send and receive).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }

        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Transport for HttpTransport {
    /// GET requests never carry a body; a supplied one is dropped.
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        let url = self.url(path);
        info!("{} {}", method, url);

        let result = match (method, body) {
            (Method::Get, _) => self.agent.get(&url).call(),
            (Method::Post, Some(data)) => self
                .agent
                .post(&url)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .send(data),
            (Method::Post, None) => self.agent.post(&url).send_empty(),
            (Method::Put, Some(data)) => self
                .agent
                .put(&url)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .send(data),
            (Method::Put, None) => self.agent.put(&url).send_empty(),
            (Method::Delete, Some(data)) => self
                .agent
                .delete(&url)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .force_send_body()
                .send(data),
            (Method::Delete, None) => self.agent.delete(&url).call(),
        };

        let mut response = result.map_err(|e| match e {
            ureq::Error::Timeout(_) => TransportError::Timeout { url: url.clone() },
            ureq::Error::BadUri(msg) => TransportError::InvalidUrl(msg),
            other => TransportError::Request {
                url: url.clone(),
                message: other.to_string(),
            },
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body {
                url: url.clone(),
                message: e.to_string(),
            })?;

        debug!(status, url = %url, bytes = body.len(), "engine responded");
        Ok(RawResponse { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}
