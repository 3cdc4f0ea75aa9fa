//! Shard router: deterministic writes, fan-out reads.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::UrlShard;
use crate::domain::sharding::ShardPolicy;
use crate::error::AppError;

/// Routes writes to the owner's shard and fans reads out across all shards.
///
/// The shard list order is fixed at construction and defines the read fan-out
/// order. Since codes carry no shard hint, a cache-miss read costs one replica
/// query per shard in the worst case; the loop short-circuits on the first
/// hit.
pub struct ShardRouter {
    shards: Vec<Arc<dyn UrlShard>>,
    policy: Arc<dyn ShardPolicy>,
}

impl ShardRouter {
    /// Creates a router over a fixed, ordered shard list.
    pub fn new(shards: Vec<Arc<dyn UrlShard>>, policy: Arc<dyn ShardPolicy>) -> Self {
        assert!(!shards.is_empty(), "ShardRouter requires at least one shard");
        Self { shards, policy }
    }

    /// Selects the shard index owning `owner_id`'s rows.
    ///
    /// Pure and deterministic; repeated calls with the same owner id always
    /// select the same shard.
    pub fn shard_for(&self, owner_id: i64) -> usize {
        self.policy.shard_for(owner_id, self.shards.len())
    }

    /// Inserts a new short URL into the owner's shard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::WriteFailure`] if the shard is unreachable or the
    /// code collides with an existing row on that shard.
    pub async fn create_url(
        &self,
        owner_id: i64,
        code: &str,
        target_url: &str,
    ) -> Result<ShortUrl, AppError> {
        let idx = self.shard_for(owner_id);
        debug!(owner_id, shard = idx, code, "routing insert to owner shard");

        self.shards[idx].insert_url(owner_id, code, target_url).await
    }

    /// Looks up a code across every shard's replica in fixed order.
    ///
    /// Stops at the first shard that holds the code; remaining shards are not
    /// queried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] if a shard read fails before the code is
    /// found. A backend failure is never reported as "not found".
    pub async fn get_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        for (idx, shard) in self.shards.iter().enumerate() {
            if let Some(url) = shard.find_by_code(code).await? {
                debug!(shard = idx, code, "code found");
                return Ok(Some(url));
            }
        }

        debug!(code, "code not found on any shard");
        Ok(None)
    }
}
