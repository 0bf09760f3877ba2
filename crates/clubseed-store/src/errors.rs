use clubseed_core::Collection;
use thiserror::Error;

/// Errors raised by document store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("bson error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported store: {0}")]
    UnsupportedEngine(String),
    #[error("corrupt collection '{collection}': {message}")]
    Corrupt {
        collection: Collection,
        message: String,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
