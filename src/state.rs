use std::sync::Arc;

use crate::application::services::{ResolveService, ShortenService};
use crate::domain::click_worker::ClickRecorder;

/// Shared handles passed into every request handler.
///
/// All contained resources (shard pools, cache client, broker channel) are
/// constructed once at process start and live for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub resolve_service: Arc<ResolveService>,
    pub clicks: ClickRecorder,
    /// Public base used to render short URLs in responses.
    pub base_url: String,
    /// When true, client addresses are read from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        shorten_service: Arc<ShortenService>,
        resolve_service: Arc<ResolveService>,
        clicks: ClickRecorder,
        base_url: String,
        behind_proxy: bool,
    ) -> Self {
        Self {
            shorten_service,
            resolve_service,
            clicks,
            base_url,
            behind_proxy,
        }
    }
}
