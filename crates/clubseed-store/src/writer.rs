use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use clubseed_core::{Collection, Dataset};

use crate::adapter::DocumentStore;
use crate::errors::StoreResult;

/// Outcome of replacing one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionWrite {
    pub collection: Collection,
    pub deleted: u64,
    pub inserted: u64,
}

/// Per-collection counts of a dataset write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    pub engine: String,
    pub collections: Vec<CollectionWrite>,
    pub duration_ms: u64,
}

impl WriteReport {
    pub fn inserted(&self, collection: Collection) -> u64 {
        self.get(collection).map(|write| write.inserted).unwrap_or(0)
    }

    pub fn deleted(&self, collection: Collection) -> u64 {
        self.get(collection).map(|write| write.deleted).unwrap_or(0)
    }

    fn get(&self, collection: Collection) -> Option<&CollectionWrite> {
        self.collections
            .iter()
            .find(|write| write.collection == collection)
    }
}

/// Serialize records into store documents.
pub fn to_documents<T: Serialize>(records: &[T]) -> StoreResult<Vec<Value>> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(Into::into))
        .collect()
}

/// Replace the seeded collections with `dataset`.
///
/// Collections are emptied children-first, then filled parents-first, one
/// awaited batch at a time. The first failure aborts the write.
pub async fn write_dataset(store: &dyn DocumentStore, dataset: &Dataset) -> StoreResult<WriteReport> {
    let start = Instant::now();

    let batches = [
        (Collection::Clubs, to_documents(&dataset.clubs)?),
        (Collection::Events, to_documents(&dataset.events)?),
        (Collection::Tables, to_documents(&dataset.tables)?),
        (Collection::Reservations, to_documents(&dataset.reservations)?),
    ];

    let mut deleted = Vec::with_capacity(batches.len());
    for collection in Collection::SEEDED.iter().rev().copied() {
        let removed = store.delete_all(collection).await?;
        info!(event = "store_wiped", collection = %collection, deleted = removed);
        deleted.push((collection, removed));
    }

    let mut report = WriteReport {
        engine: store.engine().to_string(),
        collections: Vec::with_capacity(batches.len()),
        duration_ms: 0,
    };

    for (collection, documents) in batches {
        let inserted = store.insert_many(collection, documents).await?;
        info!(event = "batch_written", collection = %collection, inserted);
        let removed = deleted
            .iter()
            .find(|(wiped, _)| *wiped == collection)
            .map(|(_, removed)| *removed)
            .unwrap_or(0);
        report.collections.push(CollectionWrite {
            collection,
            deleted: removed,
            inserted,
        });
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}
