use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use clubseed_core::Collection;

use crate::adapter::DocumentStore;
use crate::errors::{StoreError, StoreResult};

/// In-process document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<Collection, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collections<T>(
        &self,
        collection: Collection,
        f: impl FnOnce(&mut BTreeMap<Collection, Vec<Value>>) -> T,
    ) -> StoreResult<T> {
        let mut guard = self.collections.lock().map_err(|_| StoreError::Corrupt {
            collection,
            message: "memory store lock poisoned".to_string(),
        })?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn delete_all(&self, collection: Collection) -> StoreResult<u64> {
        self.with_collections(collection, |collections| {
            collections
                .remove(&collection)
                .map(|docs| docs.len() as u64)
                .unwrap_or(0)
        })
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<u64> {
        let inserted = documents.len() as u64;
        self.with_collections(collection, |collections| {
            collections.entry(collection).or_default().extend(documents);
        })?;
        Ok(inserted)
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        self.with_collections(collection, |collections| {
            collections
                .get(&collection)
                .map(|docs| docs.len() as u64)
                .unwrap_or(0)
        })
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.with_collections(collection, |collections| {
            collections.get(&collection).cloned().unwrap_or_default()
        })
    }
}
