//! PostgreSQL implementation of a single URL shard.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use tracing::error;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::UrlShard;
use crate::error::{AppError, map_shard_write_error};

/// One relational shard, addressed through two pools.
///
/// The read-write pool is the only writer of this shard's rows; the
/// read-only pool may point at a replica and serves the code fan-out reads.
/// Both pools are long-lived, created once at process start.
pub struct PgUrlShard {
    label: String,
    rw: PgPool,
    ro: PgPool,
}

impl PgUrlShard {
    /// Creates a shard with its read-write and read-only pools.
    ///
    /// `label` only appears in logs; routing never depends on it.
    pub fn new(label: impl Into<String>, rw: PgPool, ro: PgPool) -> Self {
        Self {
            label: label.into(),
            rw,
            ro,
        }
    }

    /// The shard's read-write pool, used to run migrations at startup.
    pub fn rw_pool(&self) -> &PgPool {
        &self.rw
    }
}

#[async_trait]
impl UrlShard for PgUrlShard {
    async fn insert_url(
        &self,
        owner_id: i64,
        code: &str,
        target_url: &str,
    ) -> Result<ShortUrl, AppError> {
        sqlx::query_as::<_, ShortUrl>(
            r#"
            INSERT INTO urls (owner_id, code, target_url)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, code, target_url
            "#,
        )
        .bind(owner_id)
        .bind(code)
        .bind(target_url)
        .fetch_one(&self.rw)
        .await
        .map_err(|e| {
            error!(shard = %self.label, code, "shard insert failed: {}", e);
            map_shard_write_error(e)
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        sqlx::query_as::<_, ShortUrl>(
            r#"
            SELECT id, owner_id, code, target_url
            FROM urls
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.ro)
        .await
        .map_err(|e| {
            error!(shard = %self.label, code, "shard read failed: {}", e);
            AppError::backend("Shard read failed", json!({ "shard": self.label }))
        })
    }
}
