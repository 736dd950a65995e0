//! Operation catalog
//!
//! A small fixed vocabulary of operation kinds (INSERT/UPDATE/DELETE).
//! Each kind is an immutable named record referenced by id from audit
//! records. The catalog is seeded once at startup and never mutated, so
//! it can be shared between callers without locking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TrailError, TrailResult};

/// A single catalog entry: a named kind of audited mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationKind {
    /// Surrogate id referenced by audit records
    pub id: u32,

    /// Unique operation name (INSERT, UPDATE or DELETE)
    pub name: Operation,
}

/// The three kinds of mutation the audit trail records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert => write!(f, "INSERT"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INSERT" => Ok(Operation::Insert),
            "UPDATE" => Ok(Operation::Update),
            "DELETE" => Ok(Operation::Delete),
            other => Err(TrailError::operation_not_found(other)),
        }
    }
}

/// Read-only catalog of operation kinds, seeded at initialization
#[derive(Debug, Clone)]
pub struct OperationCatalog {
    entries: [OperationKind; 3],
}

impl OperationCatalog {
    /// Seed the catalog with the three fixed operation kinds
    pub fn seed() -> Self {
        Self {
            entries: [
                OperationKind {
                    id: 1,
                    name: Operation::Insert,
                },
                OperationKind {
                    id: 2,
                    name: Operation::Update,
                },
                OperationKind {
                    id: 3,
                    name: Operation::Delete,
                },
            ],
        }
    }

    /// Look up a catalog entry by operation name
    pub fn lookup(&self, name: Operation) -> TrailResult<&OperationKind> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| TrailError::operation_not_found(name.to_string()))
    }

    /// Look up a catalog entry by surrogate id
    pub fn get(&self, id: u32) -> TrailResult<&OperationKind> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| TrailError::operation_not_found(id.to_string()))
    }

    /// Resolve an operation id to its display name, or "?" if unknown
    pub fn name_of(&self, id: u32) -> String {
        self.get(id)
            .map(|e| e.name.to_string())
            .unwrap_or_else(|_| "?".to_string())
    }

    /// All catalog entries in seed order
    pub fn entries(&self) -> &[OperationKind] {
        &self.entries
    }
}

impl Default for OperationCatalog {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Insert.to_string(), "INSERT");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!(Operation::from_str("INSERT").unwrap(), Operation::Insert);
        assert_eq!(Operation::from_str("update").unwrap(), Operation::Update);
        assert!(Operation::from_str("TRUNCATE").is_err());
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = OperationCatalog::seed();
        assert_eq!(catalog.entries().len(), 3);

        let insert = catalog.lookup(Operation::Insert).unwrap();
        assert_eq!(insert.id, 1);

        let delete = catalog.lookup(Operation::Delete).unwrap();
        assert_eq!(delete.id, 3);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = OperationCatalog::seed();
        assert_eq!(catalog.get(2).unwrap().name, Operation::Update);

        let err = catalog.get(99).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_name_resolution() {
        let catalog = OperationCatalog::seed();
        assert_eq!(catalog.name_of(1), "INSERT");
        assert_eq!(catalog.name_of(99), "?");
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = OperationCatalog::seed();
        let mut ids: Vec<u32> = catalog.entries().iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_serialization() {
        let kind = OperationKind {
            id: 1,
            name: Operation::Insert,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert!(json.contains("\"INSERT\""));

        let back: OperationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
