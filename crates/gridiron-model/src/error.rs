//! Error types for model training and prediction.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during model training and prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An input table is missing a required column
    #[error("Missing column {column:?} in {table} table")]
    MissingColumn {
        /// Table the column was expected in
        table: String,
        /// Name of the missing column
        column: String,
    },

    /// A required cell is null
    #[error("Null value in column {column:?} at row {row}")]
    NullValue {
        /// Column containing the null
        column: String,
        /// Zero-based row index
        row: usize,
    },

    /// Feature matrix and target vector disagree on length
    #[error("Dimension mismatch: {rows} feature rows but {targets} targets")]
    DimensionMismatch {
        /// Number of feature rows
        rows: usize,
        /// Number of target values
        targets: usize,
    },

    /// Training set has no rows
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Invalid hyperparameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// CSV serialization error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
