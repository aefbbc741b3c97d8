//! Training: feature file → fitted ensemble.
//!
//! A demo training step by design: the whole feature table is the training
//! set, the hyperparameters are the fixed defaults, and no evaluation
//! metric is computed beyond a training summary.

use crate::error::{ModelError, Result};
use crate::gbm::{GbmConfig, GradientBoostedRegressor};
use gridiron_features::{FEATURE_COLUMNS, TARGET_COLUMN};
use ndarray::{Array1, Array2};
use polars::prelude::*;

/// Extract named columns into a row-major feature matrix.
///
/// Every column is cast to `f64`. A missing column or a null cell is
/// fatal for the whole run; there is no per-row skip.
pub fn design_matrix(df: &DataFrame, table: &str, columns: &[&str]) -> Result<Array2<f64>> {
    let mut matrix = Array2::<f64>::zeros((df.height(), columns.len()));

    for (j, &column) in columns.iter().enumerate() {
        let series = df
            .column(column)
            .map_err(|_| ModelError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            })?
            .cast(&DataType::Float64)?;
        let values = series.f64()?;

        for i in 0..df.height() {
            matrix[[i, j]] = values.get(i).ok_or_else(|| ModelError::NullValue {
                column: column.to_string(),
                row: i,
            })?;
        }
    }

    Ok(matrix)
}

/// Extract one named column as the target vector.
pub fn target_vector(df: &DataFrame, table: &str, column: &str) -> Result<Array1<f64>> {
    let matrix = design_matrix(df, table, &[column])?;
    Ok(matrix.column(0).to_owned())
}

/// Fit the score-differential model on the feature table.
///
/// Predictors are exactly [`FEATURE_COLUMNS`]; the target is
/// [`TARGET_COLUMN`]; hyperparameters are [`GbmConfig::default`].
pub fn train(features: &DataFrame) -> Result<GradientBoostedRegressor> {
    let x = design_matrix(features, "features", &FEATURE_COLUMNS)?;
    let y = target_vector(features, "features", TARGET_COLUMN)?;
    GradientBoostedRegressor::fit(&x, &y, GbmConfig::default())
}
