//! `mpesa init`: write a default configuration file.

use clap::Args;
use std::path::Path;

use crate::config::MpesaConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, path: &Path) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    MpesaConfig::default().save(path)?;

    println!("Wrote default configuration to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set gateway.api_key and gateway.public_key (or MPESA_API_KEY / MPESA_PUBLIC_KEY)");
    println!("  2. Set gateway.market and gateway.service_provider_code");
    println!("  3. Run `mpesa session` to check the credentials");
    Ok(())
}
