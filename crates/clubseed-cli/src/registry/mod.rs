//! Per-run artifact directory: `config.json`, `logs.ndjson` and `summary.json`.

mod logging;
mod run;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use logging::init_run_logging;
pub use run::{RunContext, start_run, write_summary};

#[derive(Debug, Error)]
pub enum RunArtifactError {
    #[error("cannot create run directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("logging already initialized: {0}")]
    SubscriberInstalled(String),
}
