#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gridironlabs/gridiron/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod error;

pub use builder::{FEATURE_COLUMNS, NEUTRAL_VENUE_SENTINEL, TARGET_COLUMN, build_features};
pub use error::{FeatureError, Result};
