//! Aidflow - Aid flow spreadsheet to ODA/OOF CSV
//!
//! Reads `data/data.xlsx`, keeps Grant and Loan flows, maps them to ODA and OOF
//! and writes `data/aiddata.csv` with the recipient code and flow code.

mod config;
mod data;
mod pipeline;
mod stats;

use anyhow::Context;
use config::PipelineConfig;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Configure logging
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // Run the export
    let config = PipelineConfig::default();
    let report = pipeline::run(&config).with_context(|| {
        format!(
            "failed to export {} to {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    info!("Preview:\n{}", report.preview);

    for (flow, counts) in &report.recipients {
        let top: Vec<String> = counts
            .iter()
            .take(config.top_recipients)
            .map(|c| format!("{}={}", c.recipient_code, c.count))
            .collect();
        info!(
            %flow,
            code = flow.code(),
            recipients = counts.len(),
            "top recipients: {}",
            top.join(", ")
        );
    }

    debug!(
        loaded = report.rows_loaded,
        filtered = report.rows_after_filter,
        written = report.rows_written,
        "run complete"
    );
    Ok(())
}
