//! Stub collaborators shared by unit tests.

use async_trait::async_trait;
use mpesa_core::{ClientConfig, Market, OperationKind, Platform};
use mpesa_crypto::GatewayPrivateKey;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{GatewayReply, GatewayRequest, HttpExecutor};

/// Executor that answers from per-operation queues and records every call.
pub(crate) struct StubExecutor {
    replies: Mutex<HashMap<OperationKind, VecDeque<Result<GatewayReply, TransportError>>>>,
    calls: Mutex<Vec<GatewayRequest>>,
    delay: Option<Duration>,
}

impl StubExecutor {
    pub(crate) fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn reply(&self, operation: OperationKind, reply: GatewayReply) {
        self.replies
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(Ok(reply));
    }

    pub(crate) fn fail(&self, operation: OperationKind, error: TransportError) {
        self.replies
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(Err(error));
    }

    pub(crate) fn calls(&self) -> Vec<GatewayRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn operations(&self) -> Vec<OperationKind> {
        self.calls().iter().map(|c| c.operation).collect()
    }
}

#[async_trait]
impl HttpExecutor for StubExecutor {
    async fn execute(&self, request: GatewayRequest) -> Result<GatewayReply, TransportError> {
        let operation = request.operation;
        self.calls.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .get_mut(&operation)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(TransportError::Request(format!("no stub reply for {}", operation))))
    }
}

/// RSA key pair generated once per test binary.
pub(crate) fn gateway_key() -> &'static GatewayPrivateKey {
    static KEY: OnceLock<GatewayPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| GatewayPrivateKey::generate(1024).unwrap())
}

pub(crate) fn test_config() -> ClientConfig {
    let public_key = gateway_key().public_key().to_base64().unwrap();
    let mut config = ClientConfig::new(
        Market::Tanzania,
        Platform::Sandbox,
        "test-api-key",
        public_key,
        "000000",
    );
    config.session_lifetime_minutes = 5;
    config.request_timeout_secs = 2;
    config
}

pub(crate) fn session_reply(id: &str) -> GatewayReply {
    GatewayReply::new(
        200,
        format!(
            r#"{{"output_ResponseCode":"INS-0","output_ResponseDesc":"Request processed successfully","output_SessionID":"{}"}}"#,
            id
        ),
    )
}
