//! Short URL entity representing a code-to-target mapping.

/// A shortened URL row.
///
/// Each row is owned by exactly one shard, determined solely by `owner_id`.
/// Rows are immutable once created; there is no update or delete path, so
/// cached copies only ever go stale by TTL expiry.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortUrl {
    /// Identifier assigned by the owning shard. Only unique within that shard.
    pub id: i64,
    pub owner_id: i64,
    pub code: String,
    pub target_url: String,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(id: i64, owner_id: i64, code: String, target_url: String) -> Self {
        Self {
            id,
            owner_id,
            code,
            target_url,
        }
    }
}
