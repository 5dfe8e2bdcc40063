//! Spreadsheet Loader Module
//! Reads the first worksheet of a workbook (calamine) or a CSV file (Polars)
//! fully into a DataFrame.

use crate::data::schema::ensure_unique;
use crate::data::SchemaError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to parse spreadsheet {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),
}

impl LoaderError {
    fn format(path: &Path, message: impl ToString) -> Self {
        LoaderError::Format {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Supported input flavours, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Workbook,
    Csv,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceKind::Workbook),
            "csv" => Some(SourceKind::Csv),
            _ => None,
        }
    }
}

/// Loads flow spreadsheets into memory.
pub struct DataLoader;

impl DataLoader {
    /// Load the whole file at `path` as a table with named columns.
    pub fn load(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let kind = SourceKind::from_path(path)
            .ok_or_else(|| LoaderError::format(path, "unsupported file extension"))?;

        let df = match kind {
            SourceKind::Workbook => Self::load_workbook(path)?,
            SourceKind::Csv => Self::load_csv(path)?,
        };

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded spreadsheet"
        );
        Ok(df)
    }

    /// Read the first worksheet. The first row holds the column names.
    fn load_workbook(path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| LoaderError::format(path, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoaderError::format(path, "workbook has no worksheet"))?
            .map_err(|e| LoaderError::format(path, e))?;

        Self::range_to_frame(&range)
    }

    /// Use lazy evaluation for the CSV scan, then collect.
    ///
    /// The raw header row is checked first: Polars renames repeated names,
    /// which would hide a duplicate column.
    fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let headers = csv_headers(path)?;
        ensure_unique(&headers)?;

        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::format(path, e))
    }

    /// Turn a cell range into string columns, one per header cell.
    pub(crate) fn range_to_frame(range: &Range<Data>) -> Result<DataFrame, LoaderError> {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(DataFrame::empty());
        };

        let headers = header_names(header_row);
        ensure_unique(&headers)?;

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for row in rows {
            for (idx, column) in values.iter_mut().enumerate() {
                column.push(row.get(idx).and_then(cell_text));
            }
        }

        let columns = headers
            .into_iter()
            .zip(values)
            .map(|(name, column)| Column::new(name.into(), column))
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Column names exactly as written in the first CSV record.
fn csv_headers(path: &Path) -> Result<Vec<String>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| LoaderError::format(path, e))?;
    let headers = reader.headers().map_err(|e| LoaderError::format(path, e))?;
    Ok(headers.iter().map(str::to_string).collect())
}

/// Header names, with blank header cells named after their position.
fn header_names(row: &[Data]) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(idx, cell)| cell_text(cell).unwrap_or_else(|| format!("Unnamed: {}", idx)))
        .collect()
}

/// String form of a cell. Empty and error cells are missing.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
