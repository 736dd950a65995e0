//! Entity snapshots
//!
//! An `EntitySnapshot` is an insertion-ordered mapping from field name to
//! string value (or null), representing one entity's full state at one
//! instant. Snapshots are ephemeral: they are consumed by the diff engine
//! or rendered whole into a record payload, never persisted directly.
//!
//! Field order follows the order fields were inserted, which for entities
//! built through [`Auditable::describe`] is their declaration order. Keeping
//! that order stable makes rendered payloads deterministic.

use serde::Serialize;
use serde_json::Value;

use crate::error::{TrailError, TrailResult};

/// Ordered field name -> value mapping for one entity at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySnapshot {
    fields: Vec<(String, Option<String>)>,
}

impl EntitySnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, preserving insertion order
    ///
    /// Inserting a name that is already present replaces its value in place
    /// without disturbing the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Builder-style insert for test fixtures and describe() impls
    pub fn with(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.insert(name, value.map(str::to_string));
        self
    }

    /// Get a field's value; outer None means the field is absent,
    /// inner None means the field is present but null
    pub fn get(&self, name: &str) -> Option<&Option<String>> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether the snapshot contains a field with this name
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the snapshot has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a snapshot from a JSON object value
    ///
    /// Each top-level field becomes one snapshot entry: null stays null,
    /// strings are taken verbatim, and every other value uses its JSON
    /// text form. Non-object input is rejected as invalid.
    pub fn from_value(value: &Value) -> TrailResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            TrailError::InvalidInput(format!(
                "snapshot input must be a JSON object, got {}",
                json_kind(value)
            ))
        })?;

        let mut snapshot = Self::new();
        for (key, val) in obj {
            snapshot.insert(key.clone(), scalar_repr(val));
        }
        Ok(snapshot)
    }

    /// Build a snapshot from any serializable entity
    ///
    /// The entity must serialize to a JSON object; anything else (a plain
    /// string, a number, a sequence) cannot be audited field-by-field and
    /// yields a `Serialization` error.
    pub fn from_serialize<T: Serialize>(entity: &T) -> TrailResult<Self> {
        let value = serde_json::to_value(entity)
            .map_err(|e| TrailError::Serialization(format!("entity not serializable: {}", e)))?;
        match Self::from_value(&value) {
            Ok(snapshot) => Ok(snapshot),
            Err(TrailError::InvalidInput(msg)) => Err(TrailError::Serialization(msg)),
            Err(e) => Err(e),
        }
    }
}

/// String representation of a JSON leaf value; null maps to None
fn scalar_repr(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Capability implemented by every audited entity type
///
/// Replaces runtime reflection with an explicit per-type contract: the
/// entity names itself, summarizes itself for the record message, and
/// lists its fields in declaration order.
pub trait Auditable {
    /// The entity's type name, used as the record's target label
    fn type_name(&self) -> &'static str;

    /// Short human summary of the entity (typically its display form)
    fn summary(&self) -> String;

    /// Full field-value capture in declaration order
    fn describe(&self) -> TrailResult<EntitySnapshot>;
}
