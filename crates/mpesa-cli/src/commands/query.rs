//! `mpesa query`: transaction status lookup.

use clap::Args;
use mpesa_client::IPaymentGateway;
use mpesa_core::QueryTxParams;

use crate::config::MpesaConfig;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Transaction or conversation id to look up.
    #[arg(short, long)]
    pub reference: String,

    /// Third-party conversation id of the original request.
    #[arg(long)]
    pub third_party_id: String,
}

pub async fn run(args: &QueryArgs, config: &MpesaConfig) -> anyhow::Result<()> {
    let client = super::connect(config)?;
    let params = QueryTxParams {
        query_reference: args.reference.clone(),
        third_party_id: args.third_party_id.clone(),
    };

    let res = client.query_tx(&params).await?;
    println!("Transaction status");
    println!("  Status:   {}", res.transaction_status);
    println!("  Message:  {}", res.desc);
    Ok(())
}
