use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::error;

use zonesync::api::{CloudflareClient, DesecClient};
use zonesync::config::{load_failover_config, require_env};
use zonesync::failover::run_failover;

/// Health-based DNS failover between two CDN fronts by switching a router
/// CNAME.
#[derive(Parser, Debug)]
#[command(name = "failover", version, about)]
struct Cli {
    /// Path to the failover config YAML (e.g. config/failover.example.com.yml)
    #[arg(long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_failover_config(&cli.config)?;

    let cloudflare = CloudflareClient::new(require_env("CF_API_TOKEN")?)?;
    let desec = DesecClient::new(require_env("DESEC_API_TOKEN")?)?;

    run_failover(&config, &cloudflare, &desec).await?;
    Ok(())
}
