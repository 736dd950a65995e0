//! Payload table rendering
//!
//! Turns a field diff or a full snapshot into the two-column text table
//! stored as a record's payload and shown by the CLI.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::audit::FieldDiff;
use crate::models::EntitySnapshot;

/// How a null field value is displayed
const NULL_DISPLAY: &str = "null";

/// Render a field diff as a "new value / old value" table
///
/// One row per changed field, in the diff's lexicographic order. An empty
/// diff renders the header row only, so a zero-diff update still has a
/// payload.
pub fn render_diff(diff: &FieldDiff) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "New value", "Old value"]);

    for (name, change) in diff {
        builder.push_record([name.as_str(), change.new_value.as_str(), change.old_value.as_str()]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Render a full snapshot as a field/value table
///
/// Used for insert and delete records, where there is no old side to show.
pub fn render_snapshot(snapshot: &EntitySnapshot) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    for (name, value) in snapshot.iter() {
        builder.push_record([name, value.unwrap_or(NULL_DISPLAY)]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::FieldChange;

    #[test]
    fn test_render_diff_rows() {
        let mut diff = FieldDiff::new();
        diff.insert(
            "price".to_string(),
            FieldChange {
                new_value: "12".to_string(),
                old_value: "10".to_string(),
            },
        );

        let table = render_diff(&diff);
        assert!(table.contains("Field"));
        assert!(table.contains("New value"));
        assert!(table.contains("Old value"));
        assert!(table.contains("price"));
        assert!(table.contains("12"));
        assert!(table.contains("10"));
    }

    #[test]
    fn test_render_empty_diff_keeps_header() {
        let table = render_diff(&FieldDiff::new());
        assert!(table.contains("New value"));
        // Header only: exactly one content line between the borders
        assert_eq!(table.lines().filter(|l| l.contains("Field")).count(), 1);
    }

    #[test]
    fn test_render_snapshot_has_no_old_value_column() {
        let snapshot = EntitySnapshot::new()
            .with("name", Some("Gadget"))
            .with("price", Some("5"));

        let table = render_snapshot(&snapshot);
        assert!(table.contains("Gadget"));
        assert!(table.contains("price"));
        assert!(!table.contains("Old value"));
    }

    #[test]
    fn test_render_snapshot_null_field() {
        let snapshot = EntitySnapshot::new().with("memo", None);
        let table = render_snapshot(&snapshot);
        assert!(table.contains("null"));
    }

    #[test]
    fn test_render_snapshot_insertion_order() {
        let snapshot = EntitySnapshot::new()
            .with("zebra", Some("1"))
            .with("apple", Some("2"));

        let table = render_snapshot(&snapshot);
        let zebra_pos = table.find("zebra").unwrap();
        let apple_pos = table.find("apple").unwrap();
        assert!(zebra_pos < apple_pos);
    }
}
