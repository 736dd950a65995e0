//! Diff engine
//!
//! Compares two entity snapshots and produces the set of fields whose
//! values differ, for rendering into an update record's payload.
//!
//! Comparison applies boolean-literal normalization: the literal "False"
//! is treated as "0" and "True" as "1", each side independently. Some
//! snapshot layers render booleans as the words True/False while others
//! render them numerically; without this the same state would show up as
//! a spurious change. No other coercion is applied, so "10" vs "10.0"
//! still counts as a difference.
//!
//! A field where either side is null or absent is excluded from the diff,
//! even when the other side holds a real value. One-sided appearance or
//! disappearance of a value is therefore invisible in the audit trail.
//! That matches the behavior this engine replaces; callers relying on
//! addition/removal tracking should capture full snapshots instead.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::EntitySnapshot;

/// The before/after values of a single changed field
///
/// Holds the unnormalized originals; normalization is comparison-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub new_value: String,
    pub old_value: String,
}

/// Changed fields keyed by name, iterating in lexicographic order
pub type FieldDiff = BTreeMap<String, FieldChange>;

/// Compare two snapshots field by field
///
/// The result contains exactly the fields whose normalized string values
/// differ and where neither side is null or absent. Output order is
/// lexicographic regardless of either snapshot's native order. The result
/// may be empty; an empty diff is not an error.
pub fn diff(new_snapshot: &EntitySnapshot, old_snapshot: &EntitySnapshot) -> FieldDiff {
    let all_names: BTreeSet<&str> = new_snapshot
        .field_names()
        .chain(old_snapshot.field_names())
        .collect();

    let mut differences = FieldDiff::new();
    for name in all_names {
        let new_val = new_snapshot.get(name).and_then(|v| v.as_deref());
        let old_val = old_snapshot.get(name).and_then(|v| v.as_deref());

        let (Some(new_val), Some(old_val)) = (new_val, old_val) else {
            continue;
        };

        if normalize(new_val) != normalize(old_val) {
            differences.insert(
                name.to_string(),
                FieldChange {
                    new_value: new_val.to_string(),
                    old_value: old_val.to_string(),
                },
            );
        }
    }

    differences
}

/// Map boolean literals onto their numeric spellings for comparison
fn normalize(value: &str) -> &str {
    match value {
        "False" => "0",
        "True" => "1",
        other => other,
    }
}
