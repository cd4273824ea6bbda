//! Error types for statement execution.

/// Errors that can occur while executing schema or row operations.
///
/// Execution-layer failures propagate unchanged: no retries, no added
/// context at this layer.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Database error from the execution layer.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema rendering error, e.g. ALTER on a dialect that rejects it.
    #[error(transparent)]
    Schema(#[from] schemaforge_core::SchemaError),
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;
