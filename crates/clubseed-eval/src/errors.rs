use clubseed_core::Collection;
use clubseed_store::StoreError;
use thiserror::Error;

/// Errors emitted while evaluating stored data.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("cannot decode document in '{collection}': {source}")]
    Decode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
