//! `mpesa session`: open a new gateway session.

use mpesa_client::IPaymentGateway;

use crate::config::MpesaConfig;

pub async fn run(config: &MpesaConfig) -> anyhow::Result<()> {
    let client = super::connect(config)?;
    let session = client.session_id().await?;

    println!("Session opened");
    println!("  ID:       {}", session.id);
    println!("  Code:     {}", session.code);
    println!("  Message:  {}", session.desc);
    println!("  Lifetime: {} min", client.config().session_lifetime_minutes);
    Ok(())
}
