use async_trait::async_trait;
use serde_json::Value;

use clubseed_core::Collection;

use crate::errors::StoreResult;

/// Trait implemented by document stores that can hold seeded collections.
///
/// Every document carries a string `id` field.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Remove every document from `collection`, returning how many were removed.
    async fn delete_all(&self, collection: Collection) -> StoreResult<u64>;

    /// Insert a batch of documents, returning how many were inserted.
    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<u64>;

    async fn insert_one(&self, collection: Collection, document: Value) -> StoreResult<()> {
        self.insert_many(collection, vec![document]).await.map(|_| ())
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64>;

    /// All documents of `collection` in insertion order.
    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>>;
}
