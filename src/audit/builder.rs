//! Audit record builder
//!
//! Assembles a `NewAuditRecord` from an entity, the acting user, and the
//! operation kind. Pure construction: persistence is the store's job.

use crate::audit::diff::diff;
use crate::display::{render_diff, render_snapshot};
use crate::error::{TrailError, TrailResult};
use crate::models::record::clamp_message;
use crate::models::{Auditable, EntitySnapshot, NewAuditRecord, Operation, OperationCatalog};

/// Builds audit records against a seeded operation catalog
pub struct RecordBuilder<'a> {
    catalog: &'a OperationCatalog,
}

impl<'a> RecordBuilder<'a> {
    /// Create a builder over the given catalog
    pub fn new(catalog: &'a OperationCatalog) -> Self {
        Self { catalog }
    }

    /// Build an INSERT record carrying the entity's full snapshot
    pub fn build_insert<E: Auditable>(
        &self,
        entity: &E,
        actor: &str,
    ) -> TrailResult<NewAuditRecord> {
        let snapshot = entity.describe()?;
        self.assemble(entity, actor, Operation::Insert, render_snapshot(&snapshot))
    }

    /// Build a DELETE record carrying the entity's final snapshot
    pub fn build_delete<E: Auditable>(
        &self,
        entity: &E,
        actor: &str,
    ) -> TrailResult<NewAuditRecord> {
        let snapshot = entity.describe()?;
        self.assemble(entity, actor, Operation::Delete, render_snapshot(&snapshot))
    }

    /// Build an UPDATE record carrying the rendered diff
    ///
    /// `old_snapshot` must have been captured before the mutation was
    /// applied. When the caller failed to capture one, the entity is
    /// diffed against itself: the record is still written, with an empty
    /// change table. Zero-diff updates are likewise recorded, not
    /// suppressed.
    pub fn build_update<E: Auditable>(
        &self,
        entity: &E,
        old_snapshot: Option<&EntitySnapshot>,
        actor: &str,
    ) -> TrailResult<NewAuditRecord> {
        let new_snapshot = entity.describe()?;
        let old_snapshot = old_snapshot.unwrap_or(&new_snapshot);
        let changes = diff(&new_snapshot, old_snapshot);
        self.assemble(entity, actor, Operation::Update, render_diff(&changes))
    }

    fn assemble<E: Auditable>(
        &self,
        entity: &E,
        actor: &str,
        operation: Operation,
        payload: String,
    ) -> TrailResult<NewAuditRecord> {
        if actor.trim().is_empty() {
            return Err(TrailError::MissingActor(format!(
                "no actor identity supplied for {} on {}",
                operation,
                entity.type_name()
            )));
        }

        let kind = self.catalog.lookup(operation)?;
        let record = NewAuditRecord {
            message: clamp_message(&entity.summary()),
            username: actor.to_string(),
            created_on: None,
            operation_id: kind.id,
            target: entity.type_name().to_string(),
            target_values: Some(payload),
        };
        record.validate()?;
        Ok(record)
    }
}
