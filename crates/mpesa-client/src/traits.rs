use async_trait::async_trait;
use axum::response::Response;
use mpesa_core::{
    DisburseResponse, PushAsyncResponse, QueryTxParams, QueryTxResponse, Request, SessionResponse,
};

use crate::error::ClientError;

/// Payment gateway interface.
///
/// Implemented by [`GatewayClient`](crate::GatewayClient); callers that want
/// to swap the gateway out (tests, alternative rails) depend on this trait.
#[async_trait]
pub trait IPaymentGateway: Send + Sync {
    /// Open a new session, bypassing the cache.
    async fn session_id(&self) -> Result<SessionResponse, ClientError>;

    /// Prompt the customer to approve a payment (C2B single stage).
    async fn push_async(&self, request: &Request) -> Result<PushAsyncResponse, ClientError>;

    /// Pay out to a customer wallet (B2C).
    async fn disburse(&self, request: &Request) -> Result<DisburseResponse, ClientError>;

    /// Query a transaction's status. Not implemented.
    async fn query_tx(&self, params: &QueryTxParams) -> Result<QueryTxResponse, ClientError>;

    /// Serve one inbound result callback.
    async fn callback_serve(&self, body: &[u8]) -> Response;
}
