//! HTTP server initialization and runtime setup.
//!
//! Handles shard pool construction, cache and broker setup, worker spawning,
//! and the Axum server lifecycle.

use crate::application::router::ShardRouter;
use crate::application::services::{FixedWindowLimiter, ResolveService, ShortenService};
use crate::config::Config;
use crate::domain::click_worker::{ClickRecorder, run_click_publisher};
use crate::domain::repositories::UrlShard;
use crate::domain::sharding::ParityPolicy;
use crate::infrastructure::cache::{self, CacheService, NullCache, RedisCache, RedisCounterStore};
use crate::infrastructure::queue::RabbitClickQueue;
use crate::infrastructure::persistence::PgUrlShard;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - One rw/ro PostgreSQL pool pair per shard, migrations applied to each
///   shard's rw pool
/// - Redis connection, shared between the URL cache and the rate-limit
///   counters
/// - AMQP connection and the background click publisher
/// - Axum HTTP server
///
/// Redis is required: without counters the rate limiter cannot gate writes,
/// and starting without it would silently lift the limit.
///
/// # Errors
///
/// Returns an error if:
/// - A shard connection or migration fails
/// - Redis or the broker is unreachable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let mut shards: Vec<Arc<dyn UrlShard>> = Vec::with_capacity(config.shards.len());

    for shard_config in &config.shards {
        let rw = connect_pool(&config, &shard_config.rw_url)
            .await
            .with_context(|| format!("Failed to connect shard {} (rw)", shard_config.label))?;
        let ro = connect_pool(&config, &shard_config.ro_url)
            .await
            .with_context(|| format!("Failed to connect shard {} (ro)", shard_config.label))?;

        sqlx::migrate!("./migrations")
            .run(&rw)
            .await
            .with_context(|| format!("Failed to migrate shard {}", shard_config.label))?;

        tracing::info!("Connected to shard {}", shard_config.label);
        shards.push(Arc::new(PgUrlShard::new(&shard_config.label, rw, ro)));
    }

    let redis = cache::connect(&config.redis_url)
        .await
        .context("Redis is required for rate limiting")?;

    let url_cache: Arc<dyn CacheService> = if config.cache_enabled {
        Arc::new(RedisCache::new(redis.clone(), config.cache_ttl_seconds))
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };
    let counters = Arc::new(RedisCounterStore::new(redis));

    let queue = connect_broker(&config.amqp_url).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_publisher(click_rx, Arc::new(queue)));
    tracing::info!("Click publisher started");

    let router = Arc::new(ShardRouter::new(shards, Arc::new(ParityPolicy)));
    let limiter = Arc::new(FixedWindowLimiter::new(counters));
    let resolve_service = Arc::new(ResolveService::new(
        url_cache,
        router.clone(),
        config.cache_ttl_seconds,
    ));
    let shorten_service = Arc::new(ShortenService::new(
        router,
        limiter,
        resolve_service.clone(),
        config.rate_limit,
        config.rate_window_seconds,
    ));

    let state = AppState::new(
        shorten_service,
        resolve_service,
        ClickRecorder::new(click_tx),
        config.public_base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Builds a PostgreSQL pool with the configured tuning parameters.
async fn connect_pool(config: &Config, url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
}

/// Connects to the click-event broker, retrying with exponential backoff.
///
/// The broker is often the last container to come up in a compose stack, so
/// a handful of retries at startup avoids crash-looping the whole service.
pub async fn connect_broker(amqp_url: &str) -> Result<RabbitClickQueue> {
    let strategy = ExponentialBackoff::from_millis(500).map(jitter).take(5);

    let queue = Retry::spawn(strategy, || RabbitClickQueue::connect(amqp_url))
        .await
        .context("Failed to connect to broker")?;

    Ok(queue)
}
