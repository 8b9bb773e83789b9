//! sales-console: command line front end for the sales tracker API
//!
//! Reads `SALES_API_URL`, `SALES_API_TOKEN` and `SALES_API_TIMEOUT` from the
//! environment (or a `.env` file) and drives the `sales-client` stores.

mod cli;
mod commands;
mod logger;

use clap::Parser;
use sales_client::{AuthSession, NetworkHttpClient};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file before clap reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(&cli.log_level, cli.log_dir.as_deref());

    let config = cli.client_config();
    tracing::debug!(base_url = %config.base_url, timeout = config.timeout, "Client configured");

    let session = AuthSession::new(config.token.clone());
    let http = NetworkHttpClient::new(&config, session)?;

    commands::run(cli.command, http).await
}
