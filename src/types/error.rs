//! Application error taxonomy.
//!
//! One variant per failure domain. No retry or recovery is attempted at this
//! layer - errors propagate to `main` and terminate the run with a logged
//! message and non-zero exit.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration (environment variables, CLI flags)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Tracer registration or span export setup failure
    #[error("Telemetry error: {0}")]
    TelemetryError(String),

    /// LLM completion API failure (request, status, or response parsing)
    #[error("LLM error: {0}")]
    LlmError(String),

    /// Embedding API failure
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    /// Qdrant REST API failure
    #[error("Vector store error: {0}")]
    VectorStoreError(String),
}
