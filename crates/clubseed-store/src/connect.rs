use std::path::PathBuf;

use clubseed_core::redact_connection_string;

use crate::adapter::DocumentStore;
use crate::errors::{StoreError, StoreResult};
use crate::json_dir::JsonDirStore;
use crate::memory::MemoryStore;
use crate::mongo::MongoStore;
use crate::postgres::PostgresStore;

/// Store backend selected from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Postgres(String),
    Mongo(String),
    JsonDir(PathBuf),
    Memory,
}

impl StoreTarget {
    pub fn parse(url: &str) -> StoreResult<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(Self::Postgres(url.to_string()));
        }
        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            return Ok(Self::Mongo(url.to_string()));
        }
        if let Some(path) = url.strip_prefix("file://").or_else(|| url.strip_prefix("dir:")) {
            if path.is_empty() {
                return Err(StoreError::UnsupportedEngine(format!(
                    "{url} (missing directory)"
                )));
            }
            return Ok(Self::JsonDir(PathBuf::from(path)));
        }
        if url == "memory://" || url == "memory:" {
            return Ok(Self::Memory);
        }
        Err(StoreError::UnsupportedEngine(
            redact_connection_string(url).redacted,
        ))
    }

    pub fn engine(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Mongo(_) => "mongodb",
            Self::JsonDir(_) => "json_dir",
            Self::Memory => "memory",
        }
    }
}

/// Open the store named by `url`.
pub async fn open_store(url: &str) -> StoreResult<Box<dyn DocumentStore>> {
    let store: Box<dyn DocumentStore> = match StoreTarget::parse(url)? {
        StoreTarget::Postgres(url) => Box::new(PostgresStore::connect(&url).await?),
        StoreTarget::Mongo(url) => Box::new(MongoStore::connect(&url).await?),
        StoreTarget::JsonDir(root) => Box::new(JsonDirStore::open(root)?),
        StoreTarget::Memory => Box::new(MemoryStore::new()),
    };
    Ok(store)
}
