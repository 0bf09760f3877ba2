use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};

use super::RunArtifactError;
use super::run::RunPaths;

/// Console verbosity when `RUST_LOG` is unset.
const CONSOLE_DEFAULT: &str = "info";

/// Send every event to the run's `logs.ndjson`; stderr gets the `RUST_LOG` view.
pub fn init_run_logging(paths: &RunPaths) -> Result<(), RunArtifactError> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs_path)
        .map_err(|source| RunArtifactError::Write {
            path: paths.logs_path.clone(),
            source,
        })?;

    let ndjson = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(log_file));

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT));
    let console = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(ndjson)
        .with(console)
        .try_init()
        .map_err(|err| RunArtifactError::SubscriberInstalled(err.to_string()))
}
