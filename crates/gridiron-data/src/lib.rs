#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/gridironlabs/gridiron/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cfbd;
pub mod error;
pub mod store;

pub use error::{DataError, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
