//! CSV Writer Module
//! Serializes the projected table as comma-separated text.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Writes tables to CSV files.
pub struct CsvExporter;

impl CsvExporter {
    /// Create or overwrite `path` with a header row and one line per row.
    /// No index column is written.
    pub fn write(df: &DataFrame, path: &Path) -> Result<(), WriterError> {
        let mut file = File::create(path).map_err(|source| WriterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut df = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        file.sync_all().map_err(|source| WriterError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
