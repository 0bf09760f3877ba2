use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use clubseed_core::Collection;

use crate::adapter::DocumentStore;
use crate::errors::{StoreError, StoreResult};

/// Store that keeps each collection as a JSON array in `<root>/<collection>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.as_str()))
    }

    fn read(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read(&path)?;
        match serde_json::from_slice::<Value>(&content)? {
            Value::Array(documents) => Ok(documents),
            _ => Err(StoreError::Corrupt {
                collection,
                message: format!("{} does not hold a JSON array", path.display()),
            }),
        }
    }

    fn write(&self, collection: Collection, documents: &[Value]) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(documents)?;
        write_bytes_atomic(&self.collection_path(collection), &data)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    fn engine(&self) -> &'static str {
        "json_dir"
    }

    async fn delete_all(&self, collection: Collection) -> StoreResult<u64> {
        let existing = self.read(collection)?.len() as u64;
        self.write(collection, &[])?;
        Ok(existing)
    }

    async fn insert_many(&self, collection: Collection, documents: Vec<Value>) -> StoreResult<u64> {
        let inserted = documents.len() as u64;
        let mut existing = self.read(collection)?;
        existing.extend(documents);
        self.write(collection, &existing)?;
        Ok(inserted)
    }

    async fn count(&self, collection: Collection) -> StoreResult<u64> {
        Ok(self.read(collection)?.len() as u64)
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.read(collection)
    }
}

/// Write through a sibling temp file and rename so readers never see a torn file.
fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = parent {
        OpenOptions::new().read(true).open(parent)?.sync_all()?;
    }

    Ok(())
}
