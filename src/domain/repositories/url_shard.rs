//! Trait describing a single relational shard.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// A single shard holding short URL rows.
///
/// The write side targets the shard's read-write pool; the read side targets
/// its read-only replica. The shard enforces the uniqueness constraint on
/// `code`, which is how code collisions surface.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlShard`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlShard: Send + Sync {
    /// Inserts a new short URL row and returns it with its shard-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::WriteFailure`] if the shard is unreachable or the
    /// insert violates the uniqueness constraint on `code`.
    async fn insert_url(
        &self,
        owner_id: i64,
        code: &str,
        target_url: &str,
    ) -> Result<ShortUrl, AppError>;

    /// Looks up a row by its exact code on the read-only replica.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if this shard holds the code
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Backend`] if the replica is unreachable. A read
    /// failure must never be reported as "not found".
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;
}
