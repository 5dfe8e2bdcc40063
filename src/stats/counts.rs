//! Recipient Counts Module
//! Counts exported records per recipient for one flow code.

use crate::data::FlowRecord;
use std::collections::HashMap;

/// Number of records for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientCount {
    pub recipient_code: String,
    pub count: usize,
}

/// Count records with `flow_code`, keyed by the trimmed upper-case
/// recipient code.
///
/// Sorted by count descending, then by recipient code.
pub fn recipient_counts(records: &[FlowRecord], flow_code: &str) -> Vec<RecipientCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| r.flow_code == flow_code) {
        let key = record.recipient_code.trim().to_uppercase();
        if key.is_empty() {
            continue;
        }
        *counts.entry(key).or_default() += 1;
    }

    let mut ordered: Vec<RecipientCount> = counts
        .into_iter()
        .map(|(recipient_code, count)| RecipientCount {
            recipient_code,
            count,
        })
        .collect();
    ordered.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.recipient_code.cmp(&b.recipient_code))
    });
    ordered
}
