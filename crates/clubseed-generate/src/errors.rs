use thiserror::Error;

/// Errors emitted while preparing a generation run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
