use async_trait::async_trait;
use axum::{response::Response, Router};
use mpesa_core::{
    ClientConfig, DisburseResponse, OperationKind, PushAsyncResponse, QueryTxParams,
    QueryTxResponse, Request, SessionResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::RequestAdapter;
use crate::callback::{callback_router, relay_callback, CallbackHandler};
use crate::error::ClientError;
use crate::pipeline::{dispatch, GatewayOutcome};
use crate::session::SessionManager;
use crate::traits::IPaymentGateway;
use crate::transport::{GatewayRequest, HttpExecutor, ReqwestExecutor};

/// M-Pesa OpenAPI client.
///
/// Share one instance (behind an `Arc`) across tasks so they reuse the same
/// session.
pub struct GatewayClient {
    config: Arc<ClientConfig>,
    base_path: String,
    executor: Arc<dyn HttpExecutor>,
    sessions: SessionManager,
    adapter: RequestAdapter,
    callback_handler: Arc<dyn CallbackHandler>,
    deadline: Duration,
}

impl GatewayClient {
    /// Build a client over the given executor.
    pub fn new(
        config: ClientConfig,
        executor: Arc<dyn HttpExecutor>,
        callback_handler: Arc<dyn CallbackHandler>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let config = Arc::new(config);
        let base_path = config.base_path();
        let deadline = Duration::from_secs(config.request_timeout_secs);
        let sessions = SessionManager::new(Arc::clone(&config), Arc::clone(&executor));
        let adapter = RequestAdapter::from_config(&config);

        tracing::info!(
            base_path = %base_path,
            market = ?config.market,
            platform = %config.platform,
            "gateway client ready"
        );

        Ok(Self {
            config,
            base_path,
            executor,
            sessions,
            adapter,
            callback_handler,
            deadline,
        })
    }

    /// Build a client that talks to the gateway over `reqwest`.
    pub fn connect(
        config: ClientConfig,
        callback_handler: Arc<dyn CallbackHandler>,
    ) -> Result<Self, ClientError> {
        let executor = ReqwestExecutor::new(Duration::from_secs(config.request_timeout_secs))
            .map_err(|e| ClientError::Transport {
                operation: OperationKind::SessionId,
                message: e.to_string(),
            })?;
        Self::new(config, Arc::new(executor), callback_handler)
    }

    /// `https://<host>/<platform>/ipg/v2/<market>/`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Router for the callback endpoint, bound to this client's handler.
    pub fn callback_router(&self, path: &str) -> Router {
        callback_router(path, Arc::clone(&self.callback_handler))
    }

    /// Session → bearer token → payload → call → classification.
    async fn authorized_call<T>(&self, operation: OperationKind, request: &Request) -> Result<T, ClientError>
    where
        T: DeserializeOwned + GatewayOutcome,
    {
        let session_id = self.sessions.ensure_session().await?;
        let bearer_token = mpesa_crypto::encrypt(&session_id, &self.config.public_key)?;
        let payload = self.adapter.adapt(operation, request)?;

        let call = GatewayRequest::authorized(
            operation,
            format!("{}{}", self.base_path, self.config.endpoints.path(operation)),
            &bearer_token,
            Some(Value::Object(payload)),
        );
        let response = dispatch(self.executor.as_ref(), call, self.deadline).await?;

        tracing::info!(
            operation = %operation,
            third_party_id = %request.third_party_id,
            "gateway accepted request"
        );
        Ok(response)
    }
}

#[async_trait]
impl IPaymentGateway for GatewayClient {
    async fn session_id(&self) -> Result<SessionResponse, ClientError> {
        self.sessions.acquire_session().await
    }

    async fn push_async(&self, request: &Request) -> Result<PushAsyncResponse, ClientError> {
        self.authorized_call(OperationKind::PushPay, request).await
    }

    async fn disburse(&self, request: &Request) -> Result<DisburseResponse, ClientError> {
        self.authorized_call(OperationKind::Disburse, request).await
    }

    async fn query_tx(&self, _params: &QueryTxParams) -> Result<QueryTxResponse, ClientError> {
        Err(ClientError::NotImplemented(OperationKind::Query))
    }

    async fn callback_serve(&self, body: &[u8]) -> Response {
        relay_callback(self.callback_handler.as_ref(), body).await
    }
}
