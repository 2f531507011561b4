//! M-Pesa core types.
//!
//! Shared vocabulary for the gateway client: deployment context (market,
//! platform), the closed set of gateway operations, caller-facing requests,
//! gateway responses, callback payloads and client configuration.

pub mod error;
pub mod types;
pub mod payment;
pub mod callback;
pub mod config;

pub use error::CoreError;
pub use types::{HttpMethod, Market, OperationKind, Platform};
pub use payment::{
    DisburseResponse, PushAsyncResponse, QueryTxParams, QueryTxResponse, Request, SessionResponse,
};
pub use callback::{PushCallbackRequest, PushCallbackResponse};
pub use config::{ClientConfig, Endpoints, DEFAULT_HOST};
