//! Error types for tabsort-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Sort rule not found
    #[error("sort rule not found: {0}")]
    RuleNotFound(String),

    /// Extension relay / platform call failed
    #[error("relay error: {0}")]
    Relay(String),

    /// Storage backend failure
    #[error("store error: {0}")]
    Store(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
