//! M-Pesa Gateway Client
//!
//! Session-authenticated request pipeline for the M-Pesa OpenAPI: caches the
//! session key and refreshes it on expiry, encrypts credentials into bearer
//! tokens, adapts payment requests to the market's wire format, classifies
//! gateway replies, and relays inbound result callbacks to the application.

pub mod error;
pub mod transport;
pub mod pipeline;
pub mod adapter;
pub mod session;
pub mod callback;
pub mod traits;
pub mod client;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{AdaptError, CallbackError, ClientError, TransportError};
pub use transport::{GatewayReply, GatewayRequest, HttpExecutor, ReqwestExecutor};
pub use pipeline::GatewayOutcome;
pub use adapter::{RequestAdapter, WirePayload};
pub use session::{Session, SessionManager};
pub use callback::{
    callback_router, decode_callback, process_callback, relay_callback, CallbackHandler,
    CALLBACK_TIMEOUT, DEFAULT_CALLBACK_PATH,
};
pub use traits::IPaymentGateway;
pub use client::GatewayClient;
