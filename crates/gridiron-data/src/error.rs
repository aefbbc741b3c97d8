//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// The CFBD_API_KEY environment variable is unset or empty
    #[error("Missing CFBD_API_KEY environment variable")]
    MissingApiKey,

    /// The API key cannot be carried in an HTTP header
    #[error("Invalid CFBD API key")]
    InvalidApiKey,

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// CFBD API returned a non-success status
    #[error("CFBD API error for {endpoint}: HTTP {status}")]
    Api {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code returned
        status: reqwest::StatusCode,
    },

    /// Every page of a season sweep failed
    #[error("No data fetched for {endpoint}: all {pages} pages failed")]
    NoData {
        /// Endpoint path that was swept
        endpoint: String,
        /// Number of pages attempted
        pages: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
