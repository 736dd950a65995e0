//! Change-diff and audit-record engine
//!
//! The write side of the audit trail, invoked around entity mutations:
//!
//! - `diff`: compares before/after snapshots into a [`FieldDiff`].
//! - `RecordBuilder`: assembles a record from an entity, the acting user
//!   and the operation kind, rendering the diff or full snapshot as the
//!   record payload.
//! - `AuditContext` / `AuditHooks`: the lifecycle hook surface the
//!   application calls around each mutation.
//!
//! # Example
//!
//! ```rust,ignore
//! use trailkeeper::audit::{AuditContext, AuditHooks};
//! use trailkeeper::storage::AuditStore;
//!
//! let context = AuditContext::new(AuditStore::open(log_path)?);
//! let mut hooks = AuditHooks::new(&context, "alice")?;
//!
//! hooks.before_update(&product)?;
//! product.price = 12;
//! // after the mutation commits:
//! let outcome = hooks.after_update(&product)?;
//! ```

pub mod builder;
pub mod diff;
pub mod hooks;

pub use builder::RecordBuilder;
pub use diff::{diff, FieldChange, FieldDiff};
pub use hooks::{AuditContext, AuditHooks, AuditOutcome};
