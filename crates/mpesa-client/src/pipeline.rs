//! Executes a gateway call and classifies the outcome.

use mpesa_core::{DisburseResponse, PushAsyncResponse, QueryTxResponse, SessionResponse};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{ClientError, TransportError};
use crate::transport::{GatewayRequest, HttpExecutor};

/// Gateway response carrying a business-error field.
pub trait GatewayOutcome {
    /// `output_error`; non-empty means the call failed despite HTTP success.
    fn output_err(&self) -> &str;
}

impl GatewayOutcome for SessionResponse {
    fn output_err(&self) -> &str {
        &self.output_err
    }
}

impl GatewayOutcome for PushAsyncResponse {
    fn output_err(&self) -> &str {
        &self.output_err
    }
}

impl GatewayOutcome for DisburseResponse {
    fn output_err(&self) -> &str {
        &self.output_err
    }
}

impl GatewayOutcome for QueryTxResponse {
    fn output_err(&self) -> &str {
        &self.output_err
    }
}

/// Send `request` and turn the reply into `T`.
///
/// Transport failures and the deadline surface as `Transport` / `Timeout`,
/// non-2xx replies as `Gateway`, and a populated `output_error` as
/// `Business`. Nothing is retried.
pub(crate) async fn dispatch<T>(
    executor: &dyn HttpExecutor,
    request: GatewayRequest,
    deadline: Duration,
) -> Result<T, ClientError>
where
    T: DeserializeOwned + GatewayOutcome,
{
    let operation = request.operation;

    let reply = match tokio::time::timeout(deadline, executor.execute(request)).await {
        Err(_) | Ok(Err(TransportError::Timeout)) => {
            tracing::warn!(operation = %operation, after = ?deadline, "gateway call timed out");
            return Err(ClientError::Timeout {
                operation,
                after: deadline,
            });
        }
        Ok(Err(TransportError::Request(message))) => {
            tracing::warn!(operation = %operation, error = %message, "gateway call failed");
            return Err(ClientError::Transport { operation, message });
        }
        Ok(Ok(reply)) => reply,
    };

    if !reply.is_success() {
        let message = reply.error_message();
        tracing::warn!(operation = %operation, status = reply.status, error = %message, "gateway rejected call");
        return Err(ClientError::Gateway {
            operation,
            status: reply.status,
            message,
        });
    }

    let response: T = serde_json::from_str(&reply.body).map_err(|e| ClientError::Decode {
        operation,
        message: e.to_string(),
    })?;

    let output_err = response.output_err();
    if !output_err.is_empty() {
        tracing::warn!(operation = %operation, error = %output_err, "gateway reported business error");
        return Err(ClientError::Business {
            operation,
            message: output_err.to_string(),
        });
    }

    Ok(response)
}
