//! Column Schema Module
//! Exact column lookup with strict handling of near-miss names.

use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Missing column '{0}'")]
    MissingColumn(String),
    #[error("Column '{expected}' not found, refusing to match variant '{found}'")]
    CaseVariant { expected: String, found: String },
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
}

/// Loose form of a column name, used only to report near misses.
fn loose_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check that `column` exists in `df` under exactly that name.
///
/// A column that matches only after trimming or case folding is rejected
/// rather than silently used.
pub fn require_column(df: &DataFrame, column: &str) -> Result<(), SchemaError> {
    let names = df.get_column_names();
    if names.iter().any(|name| name.as_str() == column) {
        return Ok(());
    }

    let wanted = loose_key(column);
    match names.iter().find(|name| loose_key(name.as_str()) == wanted) {
        Some(found) => Err(SchemaError::CaseVariant {
            expected: column.to_string(),
            found: found.to_string(),
        }),
        None => Err(SchemaError::MissingColumn(column.to_string())),
    }
}

/// Reject header rows that name the same column twice.
pub fn ensure_unique(headers: &[String]) -> Result<(), SchemaError> {
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(SchemaError::DuplicateColumn(header.clone()));
        }
    }
    Ok(())
}
