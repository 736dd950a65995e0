//! Record display formatting
//!
//! Formats audit records for terminal listing and detail views.

use crate::models::{AuditRecord, OperationCatalog};

/// Format a single record for display (list row)
pub fn format_record_row(record: &AuditRecord, catalog: &OperationCatalog) -> String {
    format!(
        "{:>6}  {}  {:8} {:16} {:20} {}",
        record.id,
        record.created_on.format("%Y-%m-%d %H:%M:%S"),
        catalog.name_of(record.operation_id),
        truncate(&record.username, 16),
        truncate(&record.target, 20),
        truncate(&record.message, 40)
    )
}

/// Format a list of records as a table-like listing
pub fn format_record_list(records: &[AuditRecord], catalog: &OperationCatalog) -> String {
    if records.is_empty() {
        return "No audit records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:19}  {:8} {:16} {:20} {}\n",
        "Id", "Created on", "Op", "Username", "Target", "Message"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for record in records {
        output.push_str(&format_record_row(record, catalog));
        output.push('\n');
    }

    output
}

/// Format full record details, including the rendered payload
pub fn format_record_details(record: &AuditRecord, catalog: &OperationCatalog) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      {}\n", record.id));
    output.push_str(&format!(
        "Created on:  {}\n",
        record.created_on.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Username:    {}\n", record.username));
    output.push_str(&format!(
        "Operation:   {}\n",
        catalog.name_of(record.operation_id)
    ));
    output.push_str(&format!("Target:      {}\n", record.target));
    output.push_str(&format!("Message:     {}\n", record.message));

    match &record.target_values {
        Some(values) => {
            output.push_str("\nValues:\n");
            output.push_str(values);
            output.push('\n');
        }
        None => output.push_str("\nValues:      (none)\n"),
    }

    output
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
