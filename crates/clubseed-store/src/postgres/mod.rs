use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use clubseed_core::Collection;

use crate::adapter::DocumentStore;
use crate::errors::{StoreError, StoreResult};

mod queries;

const ALL_COLLECTIONS: [Collection; 5] = [
    Collection::Clubs,
    Collection::Events,
    Collection::Tables,
    Collection::Reservations,
    Collection::Reports,
];

/// Document store on PostgreSQL: one JSONB table per collection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a store using a pre-configured pool; call [`PostgresStore::prepare`] before use.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with the default pool settings and create missing collection tables.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;
        let store = Self::new(pool);
        store.prepare().await?;
        Ok(store)
    }

    pub async fn prepare(&self) -> StoreResult<()> {
        for collection in ALL_COLLECTIONS {
            queries::ensure_collection(&self.pool, collection).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn delete_all(&self, collection: Collection) -> StoreResult<u64> {
        queries::delete_all(&self.pool, collection).await
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<u64> {
        let mut rows = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StoreError::Corrupt {
                    collection,
                    message: "document without a string id".to_string(),
                })?;
            rows.push((id, document));
        }
        queries::insert_documents(&self.pool, collection, rows).await
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        queries::count(&self.pool, collection).await
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        queries::fetch_documents(&self.pool, collection).await
    }
}
