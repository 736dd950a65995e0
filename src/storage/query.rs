//! Read-side query types for the audit store

use chrono::{DateTime, Utc};

use crate::models::{AuditRecord, Operation, OperationCatalog};

/// Field filters applied by [`crate::storage::AuditStore::list`]
///
/// Every populated field must match; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact actor identity
    pub username: Option<String>,
    /// Exact target type label
    pub target: Option<String>,
    /// Operation kind
    pub operation: Option<Operation>,
    /// Inclusive lower bound on creation time
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time
    pub until: Option<DateTime<Utc>>,
}

impl RecordFilter {
    /// Whether a record passes every populated filter field
    pub fn matches(&self, record: &AuditRecord, catalog: &OperationCatalog) -> bool {
        if let Some(username) = &self.username {
            if record.username != *username {
                return false;
            }
        }
        if let Some(target) = &self.target {
            if record.target != *target {
                return false;
            }
        }
        if let Some(operation) = self.operation {
            match catalog.lookup(operation) {
                Ok(kind) if kind.id == record.operation_id => {}
                _ => return false,
            }
        }
        if let Some(since) = self.since {
            if record.created_on < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if record.created_on > until {
                return false;
            }
        }
        true
    }
}

/// Listing order by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent records first (the default)
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Offset/limit paging over a filtered listing
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Page {
    /// Page with a limit and no offset
    pub fn first(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: Some(limit),
        }
    }

    /// The whole result set
    pub fn all() -> Self {
        Self::default()
    }

    /// Apply the page bounds to a sorted result set
    pub fn apply(&self, records: Vec<AuditRecord>) -> Vec<AuditRecord> {
        let iter = records.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }
}
