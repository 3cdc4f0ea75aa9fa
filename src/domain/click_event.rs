//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A click event recorded by the redirect path at the moment of resolution.
///
/// Doubles as the queue wire format: events are serialized to JSON (camelCase
/// field names) when published and deserialized by the worker process.
///
/// # Design
///
/// - `url_id` is `None` when the resolution came from cache and the shard
///   lookup was skipped. Downstream consumers rely on null meaning "served
///   from cache", so this is preserved rather than looked up.
/// - Client metadata is optional to handle missing headers gracefully.
/// - Never mutated after creation; may be observed more than once under
///   failure (at-least-once delivery, no dedup key).
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Handed off via [`crate::domain::click_worker::ClickRecorder`] (non-blocking)
/// 3. Published to the durable queue by
///    [`crate::domain::click_worker::run_click_publisher`]
/// 4. Persisted by the worker via
///    [`crate::domain::repositories::ClickStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub code: String,
    pub url_id: Option<i64>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub ts: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a new click event stamped with the current time.
    pub fn new(
        code: String,
        url_id: Option<i64>,
        ip: Option<String>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            code,
            url_id,
            user_agent: user_agent.map(|s| s.to_string()),
            ip,
            ts: Utc::now(),
        }
    }
}
