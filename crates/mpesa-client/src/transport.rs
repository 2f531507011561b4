//! HTTP executor capability and its reqwest implementation.

use async_trait::async_trait;
use mpesa_core::{HttpMethod, OperationKind};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::TransportError;

/// An outbound gateway call, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub operation: OperationKind,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl GatewayRequest {
    /// Build a call carrying the headers every authenticated operation needs.
    pub fn authorized(
        operation: OperationKind,
        url: String,
        bearer_token: &str,
        body: Option<serde_json::Value>,
    ) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Origin".to_string(), "*".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", bearer_token));
        Self {
            operation,
            method: operation.method(),
            url,
            headers,
            body,
        }
    }

    /// Token carried in the `Authorization` header, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Raw gateway answer: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best description of a failed reply: the gateway's own error fields
    /// when the body is JSON, the raw body otherwise.
    pub fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.body) {
            for key in ["output_error", "output_ResponseDesc"] {
                if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                    if !text.is_empty() {
                        return text.to_string();
                    }
                }
            }
        }
        if self.body.is_empty() {
            format!("empty body (HTTP {})", self.status)
        } else {
            self.body.clone()
        }
    }
}

/// Performs gateway HTTP calls.
///
/// The client only depends on this capability, so tests substitute a stub
/// and deployments may wrap their own HTTP stack.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: GatewayRequest) -> Result<GatewayReply, TransportError>;
}

/// [`HttpExecutor`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    /// Create an executor whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: GatewayRequest) -> Result<GatewayReply, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            operation = %request.operation,
            method = %request.method,
            url = %request.url,
            "sending gateway request"
        );

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(operation = %request.operation, status, "gateway replied");
        Ok(GatewayReply { status, body })
    }
}
