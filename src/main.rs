//! HTTP service entry point.

use anyhow::Result;
use shardlink::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors in production)
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    logging::init(&config.log_level, &config.log_format);
    config.print_summary();

    server::run(config).await
}
