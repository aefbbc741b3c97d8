//! Model artifact persistence.
//!
//! The fitted ensemble is stored as serde JSON. There is no versioning:
//! re-running the trainer overwrites the artifact in place, and the
//! predictor treats it as read-only.

use crate::error::Result;
use crate::gbm::GradientBoostedRegressor;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Persist a fitted model, creating parent directories on demand.
pub fn save_model(model: &GradientBoostedRegressor, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), model)?;
    Ok(())
}

/// Load a previously persisted model.
pub fn load_model(path: &Path) -> Result<GradientBoostedRegressor> {
    let file = fs::File::open(path)?;
    let model = serde_json::from_reader(BufReader::new(file))?;
    Ok(model)
}
