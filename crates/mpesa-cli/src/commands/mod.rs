pub mod init;
pub mod pay;
pub mod query;
pub mod serve;
pub mod session;

use mpesa_client::GatewayClient;
use std::sync::Arc;

use crate::config::MpesaConfig;
use crate::handler::LoggingHandler;

/// Build a gateway client from the loaded configuration.
pub fn connect(config: &MpesaConfig) -> anyhow::Result<GatewayClient> {
    let client = GatewayClient::connect(config.client_config()?, Arc::new(LoggingHandler))?;
    Ok(client)
}
