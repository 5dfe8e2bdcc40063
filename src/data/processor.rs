//! Flow Processor Module
//! Filters rows by flow category, maps categories to output codes and
//! projects the table down to the exported columns.

use crate::config::{FLOW_TYPE_COLUMN, RECIPIENT_ISO3_COLUMN};
use crate::data::schema::require_column;
use crate::data::{FlowType, SchemaError};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles the filter, mapping and projection stages.
pub struct FlowProcessor;

impl FlowProcessor {
    /// Trim "Flow Type" and keep only rows labelled exactly "Grant" or "Loan".
    ///
    /// All columns are kept and the relative row order is unchanged. The
    /// trimmed labels replace the raw ones.
    pub fn filter_flow_types(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        require_column(df, FLOW_TYPE_COLUMN)?;

        let normalized = normalize_text(df.column(FLOW_TYPE_COLUMN)?);
        let mask: BooleanChunked = normalized
            .str()?
            .into_iter()
            .map(|label| Some(label.and_then(FlowType::parse).is_some()))
            .collect();

        let mut df = df.clone();
        df.with_column(normalized)?;
        Ok(df.filter(&mask)?)
    }

    /// Replace flow labels with their codes, keep exactly
    /// ["Recipient ISO-3", "Flow Type"] and drop rows with a missing value.
    pub fn map_and_project(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        require_column(df, FLOW_TYPE_COLUMN)?;
        require_column(df, RECIPIENT_ISO3_COLUMN)?;

        let labels = normalize_text(df.column(FLOW_TYPE_COLUMN)?);
        let codes: Vec<Option<&str>> = labels
            .str()?
            .into_iter()
            .map(|label| label.and_then(FlowType::parse).map(FlowType::code))
            .collect();

        let mut projected = df.select([RECIPIENT_ISO3_COLUMN, FLOW_TYPE_COLUMN])?;
        projected.with_column(Column::new(FLOW_TYPE_COLUMN.into(), codes))?;

        Self::drop_incomplete(&projected)
    }

    /// Remove rows where any column is null or blank.
    pub fn drop_incomplete(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let mut keep = vec![true; df.height()];

        for column in df.get_columns() {
            let text = normalize_text(column);
            for (slot, value) in keep.iter_mut().zip(text.str()?) {
                *slot &= value.is_some_and(|v| !v.is_empty());
            }
        }

        let mask = BooleanChunked::from_slice("complete".into(), &keep);
        Ok(df.filter(&mask)?)
    }
}

/// Convert a column to trimmed strings under the same name.
///
/// A column that cannot be cast to text becomes all-null, so its rows never
/// match a flow label.
fn normalize_text(column: &Column) -> Column {
    let name = column.name().clone();
    let Ok(text) = column.cast(&DataType::String) else {
        return Column::full_null(name, column.len(), &DataType::String);
    };
    let Ok(ca) = text.str() else {
        return Column::full_null(name, column.len(), &DataType::String);
    };

    let trimmed: Vec<Option<&str>> = ca.into_iter().map(|v| v.map(str::trim)).collect();
    Column::new(name, trimmed)
}
