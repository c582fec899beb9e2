//! CommandExecutor - HTTP Request/Response Against the Camera
//!
//! ## Responsibilities
//!
//! - POST to the camera's state and command-execute endpoints
//! - Bounded connect and total timeouts per call
//! - JSON response parsing
//!
//! No business logic, no retry. Retry policy belongs to the caller.

use serde_json::Value;
use std::time::Duration;

/// Low-level network failure, one variant per failure path
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connect or total deadline exceeded
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection refused or reset
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("Malformed JSON response: {0}")]
    MalformedJson(String),

    /// Any other request failure
    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connection(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Immutable camera address, created once at session start
#[derive(Debug, Clone)]
pub struct CameraEndpoint {
    /// Base URL including the protocol prefix path, e.g. `http://192.168.1.1/osc`
    pub base_url: String,
    /// Connect timeout applied to every call
    pub connect_timeout: Duration,
    /// Path of the state-fetch endpoint
    pub state_path: String,
    /// Path of the generic command-execute endpoint
    pub command_path: String,
}

impl CameraEndpoint {
    /// Endpoint with the standard OSC paths
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout,
            state_path: "/state".to_string(),
            command_path: "/commands/execute".to_string(),
        }
    }
}

/// Executor instance, one per session
pub struct CommandExecutor {
    client: reqwest::Client,
    endpoint: CameraEndpoint,
    poll_timeout: Duration,
    command_timeout: Duration,
}

impl CommandExecutor {
    /// Create a new executor
    pub fn new(
        endpoint: CameraEndpoint,
        poll_timeout: Duration,
        command_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(endpoint.connect_timeout)
            .build()
            .map_err(TransportError::from_reqwest)?;

        Ok(Self {
            client,
            endpoint,
            poll_timeout,
            command_timeout,
        })
    }

    /// Fetch the camera state document (POST, no body, poll timeout)
    pub async fn fetch_state(&self) -> Result<Value, TransportError> {
        self.execute(&self.endpoint.state_path, None, self.poll_timeout)
            .await
    }

    /// Run a named command against the command-execute endpoint
    ///
    /// Body is `{name, parameters?}` per the OSC protocol.
    pub async fn run_command(
        &self,
        name: &str,
        parameters: Option<Value>,
    ) -> Result<Value, TransportError> {
        let mut body = serde_json::json!({ "name": name });
        if let Some(params) = parameters {
            body["parameters"] = params;
        }

        self.execute(&self.endpoint.command_path, Some(body), self.command_timeout)
            .await
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.endpoint.base_url
    }

    async fn execute(
        &self,
        path: &str,
        body: Option<Value>,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.endpoint.base_url, path);

        let mut req = self.client.post(&url).timeout(timeout);
        if let Some(ref json) = body {
            req = req.json(json);
        }

        let resp = req.send().await.map_err(TransportError::from_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await.map_err(TransportError::from_reqwest)?;
        serde_json::from_str(&text).map_err(|e| TransportError::MalformedJson(e.to_string()))
    }
}
