//! Grouped audit activity summary
//!
//! Aggregates record counts by operation, actor, and target for the
//! `stats` command.

use std::collections::BTreeMap;

use crate::models::{AuditRecord, OperationCatalog};

/// Record counts grouped along the three queryable axes
#[derive(Debug, Clone, Default)]
pub struct ActivitySummary {
    pub total: usize,
    pub by_operation: BTreeMap<String, usize>,
    pub by_username: BTreeMap<String, usize>,
    pub by_target: BTreeMap<String, usize>,
}

impl ActivitySummary {
    /// Aggregate a set of records
    pub fn from_records(records: &[AuditRecord], catalog: &OperationCatalog) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            *summary
                .by_operation
                .entry(catalog.name_of(record.operation_id))
                .or_insert(0) += 1;
            *summary
                .by_username
                .entry(record.username.clone())
                .or_insert(0) += 1;
            *summary.by_target.entry(record.target.clone()).or_insert(0) += 1;
        }

        summary
    }
}

/// Format a summary for terminal display
pub fn format_summary(summary: &ActivitySummary) -> String {
    if summary.total == 0 {
        return "No audit records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Audit records: {}\n", summary.total));

    output.push_str("\nBy operation:\n");
    for (name, count) in &summary.by_operation {
        output.push_str(&format!("  {:20} {:>6}\n", name, count));
    }

    output.push_str("\nBy username:\n");
    for (name, count) in &summary.by_username {
        output.push_str(&format!("  {:20} {:>6}\n", name, count));
    }

    output.push_str("\nBy target:\n");
    for (name, count) in &summary.by_target {
        output.push_str(&format!("  {:20} {:>6}\n", name, count));
    }

    output
}
