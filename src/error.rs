//! Error types for the summarization pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors for tree documents and checkpoints
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Tree document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error for {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StorageError::Serialization {
            path: path.into(),
            source,
        }
    }
}

/// Failures of a single summarization request
///
/// Never fatal to a run: callers log it and leave the summary empty.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Provider returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

/// Top-level error returned by library and CLI operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
