//! trailkeeper - append-only audit trail for entity mutations
//!
//! This library records an immutable audit trail of create/update/delete
//! operations performed on arbitrary business entities: who performed the
//! action, what changed, and when. Entities opt in by implementing the
//! [`models::Auditable`] capability; the hook layer is invoked around each
//! mutation and appends one record per observed change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (snapshots, records, the operation catalog)
//! - `audit`: Diff engine, record builder, and mutation hooks
//! - `storage`: Append-only JSONL store with the read-side query surface
//! - `display`: Payload tables and record listing for terminals
//! - `reports`: Grouped activity summaries
//! - `cli`: Command handlers for the `trailkeeper` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use trailkeeper::audit::{AuditContext, AuditHooks};
//! use trailkeeper::config::TrailPaths;
//! use trailkeeper::storage::AuditStore;
//!
//! let paths = TrailPaths::new()?;
//! let context = AuditContext::new(AuditStore::open(paths.audit_log())?);
//! let mut hooks = AuditHooks::new(&context, "alice")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{TrailError, TrailResult};
