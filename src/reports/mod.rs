//! Aggregated views over the audit log

pub mod summary;

pub use summary::{format_summary, ActivitySummary};
