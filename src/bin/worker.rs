//! Click-event worker entry point.
//!
//! Consumes click events from the durable queue and persists them to the
//! MongoDB `clicks` collection. Runs as a separate process from the HTTP
//! service; several workers may run in parallel against the same queue.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin worker
//! ```
//!
//! # Environment Variables
//!
//! - `AMQP_URL` (required): broker connection string
//! - `MONGODB_URL` (required): document store connection string
//! - `MONGODB_DB`: document store database (default: `url_shortener`)

use std::sync::Arc;

use anyhow::{Context, Result};
use shardlink::infrastructure::persistence::MongoClickStore;
use shardlink::infrastructure::queue::run_click_consumer;
use shardlink::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_worker_from_env()?;

    logging::init(&config.log_level, &config.log_format);
    config.print_summary();

    let store = MongoClickStore::connect(&config.mongodb_url, &config.mongodb_db)
        .await
        .context("Failed to connect to MongoDB")?;

    let queue = server::connect_broker(&config.amqp_url).await?;

    tracing::info!("Click worker consuming");

    run_click_consumer(&queue, Arc::new(store)).await
}
