//! MongoDB implementation of the click document store.

use async_trait::async_trait;
use mongodb::{Client, Collection, bson};
use serde::Serialize;
use tracing::info;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickStore, StoreError};

/// Persisted layout of a click document in the `clicks` collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClickDocument {
    url_id: Option<i64>,
    code: String,
    user_agent: Option<String>,
    ip: Option<String>,
    ts: bson::DateTime,
}

impl From<&ClickEvent> for ClickDocument {
    fn from(event: &ClickEvent) -> Self {
        Self {
            url_id: event.url_id,
            code: event.code.clone(),
            user_agent: event.user_agent.clone(),
            ip: event.ip.clone(),
            ts: bson::DateTime::from_millis(event.ts.timestamp_millis()),
        }
    }
}

/// Append-only click store over a MongoDB collection.
pub struct MongoClickStore {
    collection: Collection<ClickDocument>,
}

impl MongoClickStore {
    /// Connects to MongoDB and binds the `clicks` collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the connection string is invalid
    /// or the server cannot be reached.
    pub async fn connect(mongodb_url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(mongodb_url)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to MongoDB: {}", e)))?;

        info!("✓ Connected to MongoDB (db: {})", db_name);

        Ok(Self {
            collection: client.database(db_name).collection("clicks"),
        })
    }
}

#[async_trait]
impl ClickStore for MongoClickStore {
    async fn insert(&self, event: &ClickEvent) -> Result<(), StoreError> {
        self.collection
            .insert_one(ClickDocument::from(event))
            .await
            .map_err(|e| StoreError::Backend(format!("Click insert failed: {}", e)))?;

        Ok(())
    }
}
