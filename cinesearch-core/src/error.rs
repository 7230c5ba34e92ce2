//! Error types for cinesearch-core

use thiserror::Error;

/// Errors that can occur while building or querying the search index
#[derive(Debug, Error)]
pub enum SearchError {
    /// Corpus is empty or a row is missing required text fields
    #[error("corpus error: {0}")]
    Data(String),

    /// Search invoked before a corpus was loaded
    #[error("search index not built yet")]
    NotReady,

    /// Requested result count is below 1
    #[error("result count must be at least 1, got {0}")]
    InvalidResultCount(usize),

    /// Underlying embedding computation failed
    #[error("embedding provider error: {0}")]
    Provider(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Create a corpus data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
