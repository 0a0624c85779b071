//! Error types for diocles-core

use thiserror::Error;

/// Main error type for the diocles-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Collector/HTTP error
    #[error("collector error: {0}")]
    Collector(String),

    /// Host read error (clock or scoreboard unavailable)
    #[error("host error: {0}")]
    Host(String),
}

/// Result type alias for diocles-core
pub type Result<T> = std::result::Result<T, Error>;
