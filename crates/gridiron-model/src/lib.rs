#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gridironlabs/gridiron/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod artifact;
pub mod error;
pub mod gbm;
pub mod predict;
pub mod train;

pub use error::{ModelError, Result};
pub use gbm::{GbmConfig, GradientBoostedRegressor};
pub use predict::{BASELINE_POINTS, Prediction, predict_matchups, print_summary, write_predictions};
pub use train::train;
