//! M-Pesa CLI: command-line client for the M-Pesa OpenAPI gateway.
//!
//! Subcommands: init, session, push, disburse, query, serve-callbacks.

mod commands;
mod config;
mod handler;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::MpesaConfig;

/// M-Pesa OpenAPI client.
#[derive(Parser, Debug)]
#[command(name = "mpesa", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "mpesa.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Open a new gateway session and print its id.
    Session,
    /// Prompt a customer to approve a payment (C2B).
    Push(commands::pay::PayArgs),
    /// Pay out to a customer wallet (B2C).
    Disburse(commands::pay::PayArgs),
    /// Query the status of a transaction.
    Query(commands::query::QueryArgs),
    /// Serve the payment result callback endpoint.
    ServeCallbacks(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args, &cli.config);
    }

    let mut config = MpesaConfig::load(&cli.config)?;
    config.apply_env();
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Session => commands::session::run(&config).await,
        Commands::Push(args) => commands::pay::push(args, &config).await,
        Commands::Disburse(args) => commands::pay::disburse(args, &config).await,
        Commands::Query(args) => commands::query::run(args, &config).await,
        Commands::ServeCallbacks(args) => commands::serve::run(args, &config).await,
    }
}

fn init_tracing(config: &MpesaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
