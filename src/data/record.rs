//! Flow Record Module
//! Typed view of the flow categories and of the exported rows.

use crate::config::{FLOW_TYPE_COLUMN, RECIPIENT_ISO3_COLUMN};
use polars::prelude::*;
use std::fmt;

/// Source flow categories kept by the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowType {
    Grant,
    Loan,
}

impl FlowType {
    pub const ALL: [FlowType; 2] = [FlowType::Grant, FlowType::Loan];

    /// Exact, case-sensitive match on an already trimmed label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Grant" => Some(FlowType::Grant),
            "Loan" => Some(FlowType::Loan),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowType::Grant => "Grant",
            FlowType::Loan => "Loan",
        }
    }

    /// Output code: Official Development Assistance or Other Official Flows.
    pub fn code(self) -> &'static str {
        match self {
            FlowType::Grant => "ODA",
            FlowType::Loan => "OOF",
        }
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One exported row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    pub recipient_code: String,
    pub flow_code: String,
}

impl FlowRecord {
    /// Read records from a projected table. Both columns are read as text
    /// whatever their dtype; rows with a null in either column are skipped.
    pub fn from_frame(df: &DataFrame) -> PolarsResult<Vec<FlowRecord>> {
        let recipients = df.column(RECIPIENT_ISO3_COLUMN)?.cast(&DataType::String)?;
        let flows = df.column(FLOW_TYPE_COLUMN)?.cast(&DataType::String)?;
        let (recipients, flows) = (recipients.str()?, flows.str()?);

        Ok(recipients
            .into_iter()
            .zip(flows)
            .filter_map(|(recipient, flow)| {
                Some(FlowRecord {
                    recipient_code: recipient?.to_string(),
                    flow_code: flow?.to_string(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_exact() {
        assert_eq!(FlowType::parse("Grant"), Some(FlowType::Grant));
        assert_eq!(FlowType::parse("Loan"), Some(FlowType::Loan));
        assert_eq!(FlowType::parse("grant"), None);
        assert_eq!(FlowType::parse(" Loan"), None);
        assert_eq!(FlowType::parse("Technical Cooperation"), None);
    }

    #[test]
    fn codes_map_one_to_one() {
        assert_eq!(FlowType::Grant.code(), "ODA");
        assert_eq!(FlowType::Loan.code(), "OOF");
    }

    #[test]
    fn numeric_recipient_codes_are_read_as_text() {
        let df = df!(
            "Recipient ISO-3" => [840i64, 356],
            "Flow Type" => ["ODA", "OOF"]
        )
        .unwrap();

        let records = FlowRecord::from_frame(&df).unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.recipient_code.as_str()).collect();
        assert_eq!(codes, ["840", "356"]);
    }

    #[test]
    fn records_skip_null_cells() {
        let df = df!(
            "Recipient ISO-3" => [Some("USA"), None, Some("IND")],
            "Flow Type" => [Some("ODA"), Some("OOF"), Some("OOF")]
        )
        .unwrap();

        let records = FlowRecord::from_frame(&df).unwrap();
        assert_eq!(
            records,
            vec![
                FlowRecord {
                    recipient_code: "USA".into(),
                    flow_code: "ODA".into(),
                },
                FlowRecord {
                    recipient_code: "IND".into(),
                    flow_code: "OOF".into(),
                },
            ]
        );
    }
}
