use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use zonesync::api::{CloudflareClient, DesecClient};
use zonesync::config::{load_zone_config, require_env};
use zonesync::sync::sync_zone;

/// Synchronize DNS records between Cloudflare and deSEC.
#[derive(Parser, Debug)]
#[command(name = "sync_dns", version, about)]
struct Cli {
    /// Path to the zone config YAML (e.g. config/zone.example.com.yml)
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
    let config = load_zone_config(&cli.config)?;
    info!(
        "loading zone config for domain {} from {}",
        config.domain,
        cli.config.display()
    );

    let cloudflare = CloudflareClient::new(require_env("CF_API_TOKEN")?)?;
    let desec = DesecClient::new(require_env("DESEC_API_TOKEN")?)?;

    sync_zone(&config, &cloudflare, &desec).await?;
    Ok(())
}
