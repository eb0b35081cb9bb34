//! rbac-gateway server binary

use anyhow::Context;
use clap::Parser;
use rbac_gateway::utils::logging::init_logging;
use rbac_gateway::{Config, Gateway};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Role-based access control gateway
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// YAML configuration file; environment variables are used when absent
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Disable every authorization check
    #[arg(long)]
    development: bool,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    if cli.development {
        config.gateway.auth.rbac.development_mode = true;
    }

    init_logging(config.logging()).context("initializing logging")?;
    info!("Listening address: {}", config.server().address());

    let gateway = Gateway::new(config).await.context("building gateway")?;
    gateway.run().await.context("serving")?;
    Ok(())
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
