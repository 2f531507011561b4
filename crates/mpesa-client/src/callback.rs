//! Inbound result callbacks.
//!
//! The gateway reports the outcome of a push payment by POSTing to the
//! callback URL registered for the application. The relay decodes the body,
//! hands it to the application's [`CallbackHandler`] and writes the handler's
//! acknowledgement back. Any failure is answered with HTTP 500 and logged.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use mpesa_core::{PushCallbackRequest, PushCallbackResponse};
use std::sync::Arc;
use std::time::Duration;

use crate::error::CallbackError;

/// Upper bound on decoding plus handling one callback.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Default route for the callback endpoint.
pub const DEFAULT_CALLBACK_PATH: &str = "/mpesa/callback";

/// Application hook invoked for every decoded callback.
#[async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn handle_callback(
        &self,
        request: PushCallbackRequest,
    ) -> Result<PushCallbackResponse, CallbackError>;
}

/// Decode a callback body.
pub fn decode_callback(body: &[u8]) -> Result<PushCallbackRequest, CallbackError> {
    serde_json::from_slice(body).map_err(|e| CallbackError::Decode(e.to_string()))
}

/// Run one callback through decode and handler, bounded by `timeout`.
pub async fn process_callback(
    handler: &dyn CallbackHandler,
    body: &[u8],
    timeout: Duration,
) -> Result<PushCallbackResponse, CallbackError> {
    let work = async {
        let request = decode_callback(body)?;
        tracing::info!(
            transaction_id = %request.transaction_id,
            third_party_id = %request.third_party_conversation_id,
            result_code = %request.result_code,
            "received payment callback"
        );
        handler.handle_callback(request).await
    };
    tokio::time::timeout(timeout, work)
        .await
        .unwrap_or(Err(CallbackError::Timeout))
}

/// Turn a relay outcome into the HTTP reply sent back to the gateway.
pub fn reply(outcome: Result<PushCallbackResponse, CallbackError>) -> Response {
    match outcome {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "payment callback failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Decode, handle and reply, with the standard one minute bound.
pub async fn relay_callback(handler: &dyn CallbackHandler, body: &[u8]) -> Response {
    reply(process_callback(handler, body, CALLBACK_TIMEOUT).await)
}

async fn handle_push_callback(
    State(handler): State<Arc<dyn CallbackHandler>>,
    body: Bytes,
) -> Response {
    relay_callback(handler.as_ref(), &body).await
}

/// Router serving the callback endpoint at `path`.
pub fn callback_router(path: &str, handler: Arc<dyn CallbackHandler>) -> Router {
    Router::new()
        .route(path, post(handle_push_callback))
        .with_state(handler)
}
