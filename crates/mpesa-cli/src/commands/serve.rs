//! `mpesa serve-callbacks`: listen for payment result callbacks.

use clap::Args;

use crate::config::MpesaConfig;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the listen address (host:port).
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Override the callback path.
    #[arg(short, long)]
    pub path: Option<String>,
}

pub async fn run(args: &ServeArgs, config: &MpesaConfig) -> anyhow::Result<()> {
    let client = super::connect(config)?;
    let addr = args.listen.clone().unwrap_or_else(|| config.callback_addr());
    let path = args.path.clone().unwrap_or_else(|| config.callback.path.clone());

    let app = client.callback_router(&path);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, path = %path, "callback server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("received shutdown signal");
        })
        .await?;

    tracing::info!("callback server stopped");
    Ok(())
}
