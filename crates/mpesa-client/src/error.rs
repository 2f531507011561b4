use mpesa_core::{CoreError, OperationKind};
use mpesa_crypto::CryptoError;
use std::time::Duration;

/// Failure raised by an [`HttpExecutor`](crate::transport::HttpExecutor).
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,
}

/// Request adaptation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdaptError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("no request mapping for operation: {0}")]
    UnsupportedOperation(OperationKind),
}

/// Gateway client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{operation}: transport error: {message}")]
    Transport {
        operation: OperationKind,
        message: String,
    },

    #[error("{operation}: no response after {after:?}")]
    Timeout {
        operation: OperationKind,
        after: Duration,
    },

    #[error("{operation}: gateway returned HTTP {status}: {message}")]
    Gateway {
        operation: OperationKind,
        status: u16,
        message: String,
    },

    #[error("could not perform {operation} request: {message}")]
    Business {
        operation: OperationKind,
        message: String,
    },

    #[error("{operation}: could not decode response: {message}")]
    Decode {
        operation: OperationKind,
        message: String,
    },

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("adapt error: {0}")]
    Adapt(#[from] AdaptError),

    #[error("config error: {0}")]
    Config(#[from] CoreError),

    #[error("{0} is not implemented")]
    NotImplemented(OperationKind),
}

impl ClientError {
    /// Operation the error was raised for, when known.
    pub fn operation(&self) -> Option<OperationKind> {
        match self {
            Self::Transport { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Gateway { operation, .. }
            | Self::Business { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::NotImplemented(operation) => Some(*operation),
            Self::Adapt(AdaptError::UnsupportedOperation(operation)) => Some(*operation),
            _ => None,
        }
    }
}

/// Callback relay errors. Each one is reported to the gateway as HTTP 500.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallbackError {
    #[error("invalid callback body: {0}")]
    Decode(String),

    #[error("{0}")]
    Handler(String),

    #[error("callback handling timed out")]
    Timeout,
}

impl CallbackError {
    /// Error for a handler to return; the message becomes the reply body.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}
