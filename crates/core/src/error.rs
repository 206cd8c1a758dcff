//! Error types for docsift.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, backend calls (completion, embedding),
//! crawling, and persistence.

use thiserror::Error;

/// Unified error type for docsift.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
///
/// Most pipeline errors never reach the caller of a crawl: they are absorbed
/// at the chunk or URL boundary and logged. Only the fatal tier (bad
/// configuration, unreachable sitemap, empty URL list) propagates out.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Completion/embedding backend errors
    #[error("Backend error: {0}")]
    Backend(String),

    /// Page rendering and sitemap fetch errors
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Chunk store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
