//! `mpesa push` / `mpesa disburse`: move money to or from a customer wallet.

use clap::Args;
use mpesa_client::IPaymentGateway;
use mpesa_core::Request;

use crate::config::MpesaConfig;

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Customer phone number; local (0...) or international form.
    #[arg(short, long)]
    pub msisdn: String,

    /// Amount in the market's currency.
    #[arg(short, long)]
    pub amount: f64,

    /// Merchant transaction reference.
    #[arg(short, long)]
    pub reference: String,

    /// Item description shown to the customer.
    #[arg(short, long)]
    pub description: String,

    /// Third-party conversation id; generated when omitted.
    #[arg(long)]
    pub third_party_id: Option<String>,
}

impl PayArgs {
    fn to_request(&self) -> Request {
        Request {
            third_party_id: self
                .third_party_id
                .clone()
                .unwrap_or_else(|| uuid::Uuid::now_v7().simple().to_string()),
            reference: self.reference.clone(),
            amount: self.amount,
            msisdn: self.msisdn.clone(),
            description: self.description.clone(),
        }
    }
}

pub async fn push(args: &PayArgs, config: &MpesaConfig) -> anyhow::Result<()> {
    let client = super::connect(config)?;
    let request = args.to_request();

    println!("Sending payment prompt...");
    println!("  To:       {}", request.msisdn);
    println!("  Amount:   {:.2} {}", request.amount, client.config().market.currency());
    println!();

    let res = client.push_async(&request).await?;
    println!("Payment prompt accepted!");
    println!("  Conversation: {}", res.conversation_id);
    println!("  Transaction:  {}", res.transaction_id);
    println!("  Third party:  {}", res.third_party_conversation_id);
    println!("  Message:      {}", res.desc);
    Ok(())
}

pub async fn disburse(args: &PayArgs, config: &MpesaConfig) -> anyhow::Result<()> {
    let client = super::connect(config)?;
    let request = args.to_request();

    println!("Sending disbursement...");
    println!("  To:       {}", request.msisdn);
    println!("  Amount:   {:.2} {}", request.amount, client.config().market.currency());
    println!();

    let res = client.disburse(&request).await?;
    println!("Disbursement accepted!");
    println!("  Conversation: {}", res.conversation_id);
    println!("  Transaction:  {}", res.transaction_id);
    println!("  Third party:  {}", res.third_party_conversation_id);
    println!("  Message:      {}", res.desc);
    Ok(())
}
