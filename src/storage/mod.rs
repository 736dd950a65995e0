//! Storage layer for trailkeeper
//!
//! One append-only JSONL log holds the audit records; the operation
//! catalog is seeded in memory. No update or delete path exists at
//! this interface.

pub mod query;
pub mod store;

pub use query::{Page, RecordFilter, SortOrder};
pub use store::AuditStore;
