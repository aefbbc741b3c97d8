//! Whole-file CSV persistence for pipeline tables.
//!
//! Every inter-stage artifact is plain delimited text with a header row,
//! rewritten in full by a single batch step. There is no schema file and
//! no versioning metadata.

use crate::error::Result;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory for unprocessed endpoint tables
pub const RAW_DIR: &str = "data/raw";

/// Raw games table file name
pub const GAMES_FILE: &str = "games.csv";

/// Raw Elo ratings table file name
pub const ELO_FILE: &str = "elo.csv";

/// Raw betting lines table file name
pub const LINES_FILE: &str = "lines.csv";

/// Path of a raw table file.
pub fn raw_path(file: &str) -> PathBuf {
    Path::new(RAW_DIR).join(file)
}

/// Write a table as CSV, creating parent directories on demand.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// Read a whole CSV table back into a DataFrame.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}
