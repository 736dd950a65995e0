//! Core data models for the audit trail

pub mod operation;
pub mod record;
pub mod snapshot;

pub use operation::{Operation, OperationCatalog, OperationKind};
pub use record::{AuditRecord, NewAuditRecord};
pub use snapshot::{Auditable, EntitySnapshot};
