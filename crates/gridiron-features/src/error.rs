//! Error types for feature building.

use thiserror::Error;

/// Result type for feature building.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur while building the feature table.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// An input table is missing a required column
    #[error("Missing column {column:?} in {table} table")]
    MissingColumn {
        /// Table the column was expected in
        table: String,
        /// Name of the missing column
        column: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
