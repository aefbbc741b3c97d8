//! Gradient-boosted regression over ndarray matrices.
//!
//! Squared-error boosting: the base prediction is the target mean, and
//! each round fits a depth-limited regression tree to the current
//! residuals, scaled by the learning rate. Splits are exact greedy
//! searches minimizing summed squared error.

pub mod tree;

pub use tree::RegressionTree;

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Gradient boosting configuration.
///
/// The defaults are the pipeline's fixed hyperparameters; nothing tunes
/// them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmConfig {
    /// Number of boosting rounds (default: 300)
    pub n_estimators: usize,

    /// Maximum depth of each tree (default: 6)
    pub max_depth: usize,

    /// Shrinkage applied to each tree's contribution (default: 0.05)
    pub learning_rate: f64,

    /// Minimum training rows per leaf (default: 1)
    pub min_samples_leaf: usize,
}

impl Default for GbmConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: 6,
            learning_rate: 0.05,
            min_samples_leaf: 1,
        }
    }
}

/// A fitted gradient-boosted tree regressor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedRegressor {
    config: GbmConfig,
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoostedRegressor {
    /// Fit an ensemble to the given feature matrix and targets.
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyTrainingSet`] for zero rows,
    /// [`ModelError::DimensionMismatch`] when features and targets
    /// disagree on length, and [`ModelError::InvalidParameter`] for an
    /// out-of-range configuration.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>, config: GbmConfig) -> Result<Self> {
        if config.learning_rate <= 0.0 || config.learning_rate > 1.0 {
            return Err(ModelError::InvalidParameter(format!(
                "learning_rate must be in (0, 1], got {}",
                config.learning_rate
            )));
        }
        if config.n_estimators == 0 {
            return Err(ModelError::InvalidParameter(
                "n_estimators must be positive".to_string(),
            ));
        }
        if x.nrows() == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                rows: x.nrows(),
                targets: y.len(),
            });
        }

        let base_score = y.sum() / y.len() as f64;
        let mut predictions = Array1::from_elem(y.len(), base_score);
        let mut trees = Vec::with_capacity(config.n_estimators);

        for _ in 0..config.n_estimators {
            let residuals = y - &predictions;
            let tree = RegressionTree::fit(x, &residuals, config.max_depth, config.min_samples_leaf);

            for (i, row) in x.rows().into_iter().enumerate() {
                predictions[i] += config.learning_rate * tree.predict_row(row);
            }
            trees.push(tree);
        }

        Ok(Self {
            config,
            base_score,
            trees,
        })
    }

    /// Predict one feature row.
    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let boosted: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(row))
            .sum::<f64>()
            * self.config.learning_rate;
        self.base_score + boosted
    }

    /// Predict every row of a feature matrix.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        Array1::from_iter(x.rows().into_iter().map(|row| self.predict_row(row)))
    }

    /// The configuration the ensemble was fit with.
    pub const fn config(&self) -> &GbmConfig {
        &self.config
    }

    /// Number of fitted trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}
