//! Export Pipeline
//! Load → filter → map/project → write, then summarize the written rows.

use crate::config::PipelineConfig;
use crate::data::{
    CsvExporter, DataLoader, FlowProcessor, FlowRecord, FlowType, LoaderError, ProcessorError,
    WriterError,
};
use crate::stats::{recipient_counts, RecipientCount};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Load failed: {0}")]
    Load(#[from] LoaderError),
    #[error("Processing failed: {0}")]
    Process(#[from] ProcessorError),
    #[error("Write failed: {0}")]
    Write(#[from] WriterError),
    #[error("Summary failed: {0}")]
    Summary(#[from] PolarsError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub rows_loaded: usize,
    pub rows_after_filter: usize,
    pub rows_written: usize,
    /// First rows of the written table.
    pub preview: DataFrame,
    /// Recipient rollup per output code, in `FlowType::ALL` order.
    pub recipients: Vec<(FlowType, Vec<RecipientCount>)>,
}

/// Run the export once. Nothing is written unless every earlier stage
/// succeeded.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let raw = DataLoader::load(&config.input_path)?;
    let rows_loaded = raw.height();
    info!("Rows before filtering: {}", rows_loaded);

    let filtered = FlowProcessor::filter_flow_types(&raw)?;
    drop(raw);
    let rows_after_filter = filtered.height();
    info!("Rows after Flow Type filter: {}", rows_after_filter);

    let projected = FlowProcessor::map_and_project(&filtered)?;
    let dropped = rows_after_filter - projected.height();
    if dropped > 0 {
        debug!(dropped, "dropped rows with missing values");
    }

    CsvExporter::write(&projected, &config.output_path)?;
    let rows_written = projected.height();
    info!("{} created successfully", config.output_path.display());
    info!("Final rows: {}", rows_written);
    if rows_written == 0 {
        warn!("no Grant or Loan rows with a recipient code were found");
    }

    let preview = projected.head(Some(config.preview_rows));
    let records = FlowRecord::from_frame(&projected)?;
    let recipients: Vec<(FlowType, Vec<RecipientCount>)> = FlowType::ALL
        .into_iter()
        .map(|flow| (flow, recipient_counts(&records, flow.code())))
        .collect();

    Ok(PipelineReport {
        rows_loaded,
        rows_after_filter,
        rows_written,
        preview,
        recipients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SchemaError;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Donor,Flow Type,Amount,Recipient ISO-3
Japan,\" Grant \",100,USA
Germany,Loan,250,
France,Technical Cooperation,40,FRA
Japan,Loan,75,IND
";

    fn config_in(dir: &Path, input: &str) -> PipelineConfig {
        let input_path = dir.join("data.csv");
        fs::write(&input_path, input).unwrap();
        PipelineConfig::new(input_path, dir.join("aiddata.csv"))
    }

    #[test]
    fn worked_example_end_to_end() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SAMPLE);

        let report = run(&config).unwrap();
        assert_eq!(report.rows_loaded, 4);
        assert_eq!(report.rows_after_filter, 3);
        assert_eq!(report.rows_written, 2);
        assert_eq!(report.preview.height(), 2);
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "Recipient ISO-3,Flow Type\nUSA,ODA\nIND,OOF\n"
        );
    }

    #[test]
    fn output_is_identical_across_runs() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), SAMPLE);

        run(&config).unwrap();
        let first = fs::read(&config.output_path).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn header_order_ignores_source_order() {
        let dir = tempdir().unwrap();
        let config = config_in(
            dir.path(),
            "Recipient ISO-3,Year,Flow Type\nKEN,2019,Loan\nPER,2020,Grant\nKEN,2021,Grant\n",
        );

        let report = run(&config).unwrap();
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "Recipient ISO-3,Flow Type\nKEN,OOF\nPER,ODA\nKEN,ODA\n"
        );

        let (flow, oda) = &report.recipients[0];
        assert_eq!(*flow, FlowType::Grant);
        assert_eq!(oda.len(), 2);
        let (flow, oof) = &report.recipients[1];
        assert_eq!(*flow, FlowType::Loan);
        assert_eq!(oof[0].recipient_code, "KEN");
    }

    #[test]
    fn numeric_recipient_codes_export_and_summarize() {
        let dir = tempdir().unwrap();
        let config = config_in(
            dir.path(),
            "Flow Type,Recipient ISO-3\nGrant,840\nLoan,356\nGrant,840\n",
        );

        let report = run(&config).unwrap();
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "Recipient ISO-3,Flow Type\n840,ODA\n356,OOF\n840,ODA\n"
        );
        let (_, oda) = &report.recipients[0];
        assert_eq!(oda[0].recipient_code, "840");
        assert_eq!(oda[0].count, 2);
    }

    #[test]
    fn missing_flow_type_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), "Donor,Recipient ISO-3\nJapan,USA\n");

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Process(ProcessorError::Schema(SchemaError::MissingColumn(_)))
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn case_variant_column_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path(), "flow type,Recipient ISO-3\nGrant,USA\n");

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Process(ProcessorError::Schema(SchemaError::CaseVariant { .. }))
        ));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("data.xlsx"), dir.path().join("out.csv"));

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoaderError::NotFound(_))));
    }

    #[test]
    fn unwritable_output_is_reported() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path(), SAMPLE);
        config.output_path = dir.path().join("missing").join("aiddata.csv");

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::Write(WriterError::Io { .. })));
    }
}
