//! Mutation lifecycle hooks
//!
//! The surrounding application invokes these hooks around each entity
//! mutation: `before_update` captures the pre-mutation snapshot, and the
//! `after_*` hooks build a record and append it to the store.
//!
//! Audit persistence is best-effort relative to the business mutation.
//! By the time an `after_*` hook runs, the mutation has already
//! committed, so a failed append must not unwind into the caller. The
//! hook logs the failure and hands it back as [`AuditOutcome::Dropped`]
//! so the caller can still see what happened. Build-time misuse (a
//! missing actor, an entity that cannot be described) does propagate as
//! an error, since that is a bug in the integration, not a storage
//! hiccup.

use tracing::error;

use crate::audit::builder::RecordBuilder;
use crate::error::{TrailError, TrailResult};
use crate::models::{Auditable, EntitySnapshot, OperationCatalog};
use crate::storage::AuditStore;

/// Explicit handle to the store and catalog, passed into the hook layer
///
/// Replaces any notion of a process-wide session: whoever constructs the
/// context decides which store the hooks write to.
#[derive(Debug)]
pub struct AuditContext {
    store: AuditStore,
    catalog: OperationCatalog,
}

impl AuditContext {
    /// Build a context around an open store
    pub fn new(store: AuditStore) -> Self {
        let catalog = store.catalog().clone();
        Self { store, catalog }
    }

    /// The underlying append-only store
    pub fn store(&self) -> &AuditStore {
        &self.store
    }

    /// The seeded operation catalog
    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }
}

/// What became of one audited mutation
#[derive(Debug)]
pub enum AuditOutcome {
    /// The record was appended under this id
    Recorded(u64),
    /// The append failed; the error is handed back for the caller to
    /// inspect, after the hook has already logged it
    Dropped(TrailError),
}

impl AuditOutcome {
    /// Whether the record reached the store
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }

    /// The assigned record id, if the append succeeded
    pub fn record_id(&self) -> Option<u64> {
        match self {
            Self::Recorded(id) => Some(*id),
            Self::Dropped(_) => None,
        }
    }
}

/// Per-actor hook handle over an [`AuditContext`]
#[derive(Debug)]
pub struct AuditHooks<'a> {
    context: &'a AuditContext,
    actor: String,
    captured: Option<EntitySnapshot>,
}

impl<'a> AuditHooks<'a> {
    /// Create hooks acting on behalf of the given actor
    ///
    /// The actor identity must be known at hook construction; an absent
    /// identity is a programming error in the caller, never silently
    /// defaulted to an anonymous actor.
    pub fn new(context: &'a AuditContext, actor: impl Into<String>) -> TrailResult<Self> {
        let actor = actor.into();
        if actor.trim().is_empty() {
            return Err(TrailError::MissingActor(
                "hooks constructed without an actor identity".into(),
            ));
        }
        Ok(Self {
            context,
            actor,
            captured: None,
        })
    }

    /// Capture the entity's state before an update is applied
    ///
    /// Must be called before the mutation; the snapshot is retained until
    /// the matching `after_update`.
    pub fn before_update<E: Auditable>(&mut self, entity: &E) -> TrailResult<()> {
        self.captured = Some(entity.describe()?);
        Ok(())
    }

    /// Record a committed insert
    pub fn after_insert<E: Auditable>(&self, entity: &E) -> TrailResult<AuditOutcome> {
        let builder = RecordBuilder::new(&self.context.catalog);
        let record = builder.build_insert(entity, &self.actor)?;
        Ok(self.append(record))
    }

    /// Record a committed update, diffing against the captured snapshot
    ///
    /// When `before_update` was never called the entity is diffed against
    /// itself, producing an empty change table rather than an error.
    pub fn after_update<E: Auditable>(&mut self, entity: &E) -> TrailResult<AuditOutcome> {
        let old_snapshot = self.captured.take();
        let builder = RecordBuilder::new(&self.context.catalog);
        let record = builder.build_update(entity, old_snapshot.as_ref(), &self.actor)?;
        Ok(self.append(record))
    }

    /// Record a committed delete
    pub fn after_delete<E: Auditable>(&self, entity: &E) -> TrailResult<AuditOutcome> {
        let builder = RecordBuilder::new(&self.context.catalog);
        let record = builder.build_delete(entity, &self.actor)?;
        Ok(self.append(record))
    }

    fn append(&self, record: crate::models::NewAuditRecord) -> AuditOutcome {
        match self.context.store.append(record) {
            Ok(id) => AuditOutcome::Recorded(id),
            Err(err) => {
                error!(actor = %self.actor, %err, "unable to write audit record");
                AuditOutcome::Dropped(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use crate::storage::{Page, RecordFilter, SortOrder};
    use tempfile::TempDir;

    struct Product {
        name: String,
        price: String,
    }

    impl Auditable for Product {
        fn type_name(&self) -> &'static str {
            "Product"
        }
        fn summary(&self) -> String {
            self.name.clone()
        }
        fn describe(&self) -> TrailResult<EntitySnapshot> {
            Ok(EntitySnapshot::new()
                .with("name", Some(&self.name))
                .with("price", Some(&self.price)))
        }
    }

    fn working_context() -> (AuditContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = AuditStore::open(temp_dir.path().join("audit.jsonl")).unwrap();
        (AuditContext::new(store), temp_dir)
    }

    fn broken_context() -> (AuditContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        // Parent directory missing, so every append fails
        let store =
            AuditStore::open(temp_dir.path().join("missing").join("audit.jsonl")).unwrap();
        (AuditContext::new(store), temp_dir)
    }

    #[test]
    fn test_empty_actor_rejected_at_construction() {
        let (context, _temp) = working_context();
        let err = AuditHooks::new(&context, "").unwrap_err();
        assert!(matches!(err, TrailError::MissingActor(_)));
    }

    #[test]
    fn test_insert_hook_records() {
        let (context, _temp) = working_context();
        let hooks = AuditHooks::new(&context, "bob").unwrap();

        let product = Product {
            name: "Gadget".into(),
            price: "5".into(),
        };
        let outcome = hooks.after_insert(&product).unwrap();
        assert!(outcome.is_recorded());

        let record = context.store().get(outcome.record_id().unwrap()).unwrap();
        assert_eq!(record.username, "bob");
        assert_eq!(record.operation_id, 1);
        assert!(record.target_values.unwrap().contains("Gadget"));
    }

    #[test]
    fn test_update_hook_uses_captured_snapshot() {
        let (context, _temp) = working_context();
        let mut hooks = AuditHooks::new(&context, "alice").unwrap();

        let mut product = Product {
            name: "Widget".into(),
            price: "10".into(),
        };
        hooks.before_update(&product).unwrap();
        product.price = "12".into();

        let outcome = hooks.after_update(&product).unwrap();
        let record = context.store().get(outcome.record_id().unwrap()).unwrap();
        assert_eq!(record.operation_id, 2);

        let payload = record.target_values.unwrap();
        assert!(payload.contains("price"));
        assert!(payload.contains("12"));
        assert!(payload.contains("10"));
    }

    #[test]
    fn test_update_without_capture_is_empty_diff() {
        let (context, _temp) = working_context();
        let mut hooks = AuditHooks::new(&context, "alice").unwrap();

        let product = Product {
            name: "Widget".into(),
            price: "12".into(),
        };
        let outcome = hooks.after_update(&product).unwrap();
        assert!(outcome.is_recorded());

        let record = context.store().get(outcome.record_id().unwrap()).unwrap();
        let payload = record.target_values.unwrap();
        assert!(!payload.contains("price"));
    }

    #[test]
    fn test_captured_snapshot_consumed_once() {
        let (context, _temp) = working_context();
        let mut hooks = AuditHooks::new(&context, "alice").unwrap();

        let mut product = Product {
            name: "Widget".into(),
            price: "10".into(),
        };
        hooks.before_update(&product).unwrap();
        product.price = "12".into();
        hooks.after_update(&product).unwrap();

        // A second update without a fresh capture diffs against itself
        product.price = "14".into();
        let outcome = hooks.after_update(&product).unwrap();
        let record = context.store().get(outcome.record_id().unwrap()).unwrap();
        assert!(!record.target_values.unwrap().contains("price"));
    }

    #[test]
    fn test_delete_hook_records() {
        let (context, _temp) = working_context();
        let hooks = AuditHooks::new(&context, "bob").unwrap();

        let product = Product {
            name: "Widget".into(),
            price: "10".into(),
        };
        let outcome = hooks.after_delete(&product).unwrap();
        let record = context.store().get(outcome.record_id().unwrap()).unwrap();
        assert_eq!(record.operation_id, 3);
    }

    #[test]
    fn test_persistence_failure_does_not_raise() {
        let (context, _temp) = broken_context();
        let hooks = AuditHooks::new(&context, "alice").unwrap();

        // Simulated business mutation, already committed
        let mut inventory = vec!["Widget".to_string()];
        inventory.push("Gadget".to_string());

        let product = Product {
            name: "Gadget".into(),
            price: "5".into(),
        };
        let outcome = hooks.after_insert(&product).unwrap();

        // The append failed but surfaced as a value, not an Err
        match outcome {
            AuditOutcome::Dropped(err) => assert!(err.is_persistence()),
            AuditOutcome::Recorded(_) => panic!("append should have failed"),
        }

        // The business mutation is untouched
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_sequential_mutations_keep_order() {
        let (context, _temp) = working_context();
        let hooks = AuditHooks::new(&context, "alice").unwrap();

        let first = Product {
            name: "First".into(),
            price: "1".into(),
        };
        let second = Product {
            name: "Second".into(),
            price: "2".into(),
        };
        hooks.after_insert(&first).unwrap();
        hooks.after_insert(&second).unwrap();

        let records = context
            .store()
            .list(
                &RecordFilter {
                    operation: Some(Operation::Insert),
                    ..Default::default()
                },
                SortOrder::default(),
                Page::all(),
            )
            .unwrap();
        assert_eq!(records[0].message, "Second");
        assert_eq!(records[1].message, "First");
    }
}
