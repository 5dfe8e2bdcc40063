//! Run configuration.
//! Fixed paths and column names for the aid-flow export.

use std::path::PathBuf;

/// Source spreadsheet, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "data/data.xlsx";
/// Destination CSV, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "data/aiddata.csv";
/// Rows shown in the closing preview.
pub const PREVIEW_ROWS: usize = 5;
/// Recipients listed per flow code in the closing summary.
pub const SUMMARY_TOP_RECIPIENTS: usize = 5;

pub const FLOW_TYPE_COLUMN: &str = "Flow Type";
pub const RECIPIENT_ISO3_COLUMN: &str = "Recipient ISO-3";

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub preview_rows: usize,
    pub top_recipients: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH)
    }
}

impl PipelineConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            preview_rows: PREVIEW_ROWS,
            top_recipients: SUMMARY_TOP_RECIPIENTS,
        }
    }
}
