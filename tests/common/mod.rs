#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use serde_json::json;
use tokio::sync::mpsc;
use tower::Layer;

use shardlink::application::router::ShardRouter;
use shardlink::application::services::{FixedWindowLimiter, ResolveService, ShortenService};
use shardlink::domain::click_event::ClickEvent;
use shardlink::domain::click_worker::ClickRecorder;
use shardlink::domain::entities::ShortUrl;
use shardlink::domain::repositories::{CounterError, CounterStore, UrlShard};
use shardlink::domain::sharding::ParityPolicy;
use shardlink::error::AppError;
use shardlink::infrastructure::cache::{CacheResult, CacheService};
use shardlink::state::AppState;

/// In-memory shard with a unique-code constraint and fault injection.
pub struct FakeShard {
    label: String,
    rows: Mutex<Vec<ShortUrl>>,
    next_id: AtomicI64,
    /// Number of `find_by_code` calls served, for fan-out assertions.
    pub find_calls: AtomicUsize,
    /// When set, every read fails like an unreachable shard.
    pub fail_reads: AtomicBool,
}

impl FakeShard {
    /// `id_base` keeps row ids disjoint across shards so tests can tell
    /// which shard produced a row.
    pub fn new(label: &str, id_base: i64) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(id_base),
            find_calls: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
        })
    }

    /// Seeds a row directly, bypassing the create path.
    pub fn seed(&self, owner_id: i64, code: &str, target_url: &str) -> ShortUrl {
        let url = ShortUrl::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            owner_id,
            code.to_string(),
            target_url.to_string(),
        );
        self.rows.lock().unwrap().push(url.clone());
        url
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn find_call_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlShard for FakeShard {
    async fn insert_url(
        &self,
        owner_id: i64,
        code: &str,
        target_url: &str,
    ) -> Result<ShortUrl, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|row| row.code == code) {
            return Err(AppError::write_failure(
                "Unique constraint violation",
                json!({ "constraint": "urls_code_key" }),
            ));
        }

        let url = ShortUrl::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            owner_id,
            code.to_string(),
            target_url.to_string(),
        );
        rows.push(url.clone());
        Ok(url)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::backend(
                "Shard read failed",
                json!({ "shard": self.label }),
            ));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.code == code)
            .cloned())
    }
}

/// In-memory cache; TTLs are accepted and ignored.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub fn seed(&self, code: &str, target_url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), target_url.to_string());
    }

    pub fn get(&self, code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(code).cloned()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, code: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(code).cloned())
    }

    async fn set_url(
        &self,
        code: &str,
        target_url: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), target_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// In-memory counter store with fault injection.
pub struct InMemoryCounters {
    counts: Mutex<HashMap<String, i64>>,
    pub fail: AtomicBool,
}

impl InMemoryCounters {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            counts: Mutex::new(HashMap::new()),
            fail: AtomicBool::new(false),
        })
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CounterStore for InMemoryCounters {
    async fn incr(&self, key: &str) -> Result<i64, CounterError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CounterError::Backend("counter store down".to_string()));
        }

        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn expire(&self, _key: &str, _ttl_seconds: u64) -> Result<(), CounterError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CounterError::Backend("counter store down".to_string()));
        }
        Ok(())
    }
}

/// Everything a handler test needs: the state plus direct handles to the
/// fakes for seeding and assertions.
pub struct TestContext {
    pub state: AppState,
    pub clicks: mpsc::Receiver<ClickEvent>,
    pub shard_a: Arc<FakeShard>,
    pub shard_b: Arc<FakeShard>,
    pub cache: Arc<InMemoryCache>,
    pub counters: Arc<InMemoryCounters>,
}

pub fn test_context() -> TestContext {
    let shard_a = FakeShard::new("A", 1_000);
    let shard_b = FakeShard::new("B", 2_000);
    let cache = InMemoryCache::new();
    let counters = InMemoryCounters::new();

    let (tx, rx) = mpsc::channel(100);

    let router = Arc::new(ShardRouter::new(
        vec![shard_a.clone(), shard_b.clone()],
        Arc::new(ParityPolicy),
    ));
    let limiter = Arc::new(FixedWindowLimiter::new(counters.clone()));
    let resolve_service = Arc::new(ResolveService::new(cache.clone(), router.clone(), 3600));
    let shorten_service = Arc::new(ShortenService::new(
        router,
        limiter,
        resolve_service.clone(),
        20,
        60,
    ));

    let state = AppState::new(
        shorten_service,
        resolve_service,
        ClickRecorder::new(tx),
        "http://short.test".to_string(),
        false,
    );

    TestContext {
        state,
        clicks: rx,
        shard_a,
        shard_b,
        cache,
        counters,
    }
}

/// Injects a fixed peer address so handlers that extract `ConnectInfo`
/// work under `axum_test::TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
