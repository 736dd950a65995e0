//! Audit record model
//!
//! The persisted shape of one audited mutation. Records are written once
//! by the store and never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrailError, TrailResult};

/// Maximum length of the human summary message
pub const MAX_MESSAGE_LEN: usize = 300;
/// Maximum length of the actor identity
pub const MAX_USERNAME_LEN: usize = 64;
/// Maximum length of the target type label
pub const MAX_TARGET_LEN: usize = 150;
/// Maximum length of the rendered payload
pub const MAX_TARGET_VALUES_LEN: usize = 100_000;

/// One persisted audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Surrogate key, monotonically assigned by the store
    pub id: u64,

    /// Human summary, typically the entity's display form
    pub message: String,

    /// Actor identity, never empty
    pub username: String,

    /// When the record was created (UTC)
    pub created_on: DateTime<Utc>,

    /// Reference into the operation catalog
    pub operation_id: u32,

    /// Type name of the audited entity
    pub target: String,

    /// Rendered diff table for updates, or full snapshot for insert/delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_values: Option<String>,
}

/// A record assembled by the builder but not yet appended
///
/// The store assigns the surrogate id, and a creation timestamp when the
/// builder left it unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditRecord {
    pub message: String,
    pub username: String,
    pub created_on: Option<DateTime<Utc>>,
    pub operation_id: u32,
    pub target: String,
    pub target_values: Option<String>,
}

impl NewAuditRecord {
    /// Validate field constraints before the record reaches the store
    pub fn validate(&self) -> TrailResult<()> {
        if self.username.trim().is_empty() {
            return Err(TrailError::MissingActor(
                "audit record requires a non-empty actor identity".into(),
            ));
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(TrailError::Validation(format!(
                "username too long ({} chars, max {})",
                self.username.chars().count(),
                MAX_USERNAME_LEN
            )));
        }
        if self.message.chars().count() > MAX_MESSAGE_LEN {
            return Err(TrailError::Validation(format!(
                "message too long ({} chars, max {})",
                self.message.chars().count(),
                MAX_MESSAGE_LEN
            )));
        }
        if self.target.trim().is_empty() {
            return Err(TrailError::Validation("target cannot be empty".into()));
        }
        if self.target.chars().count() > MAX_TARGET_LEN {
            return Err(TrailError::Validation(format!(
                "target too long ({} chars, max {})",
                self.target.chars().count(),
                MAX_TARGET_LEN
            )));
        }
        if let Some(values) = &self.target_values {
            if values.chars().count() > MAX_TARGET_VALUES_LEN {
                return Err(TrailError::Validation(format!(
                    "target_values too long ({} chars, max {})",
                    values.chars().count(),
                    MAX_TARGET_VALUES_LEN
                )));
            }
        }
        Ok(())
    }

    /// Materialize a persisted record with the given id
    ///
    /// The creation timestamp defaults to now when the builder did not
    /// supply one.
    pub fn into_record(self, id: u64) -> AuditRecord {
        AuditRecord {
            id,
            message: self.message,
            username: self.username,
            created_on: self.created_on.unwrap_or_else(Utc::now),
            operation_id: self.operation_id,
            target: self.target,
            target_values: self.target_values,
        }
    }
}

/// Truncate a summary to the message limit, marking the cut with an ellipsis
pub fn clamp_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_LEN {
        message.to_string()
    } else {
        let truncated: String = message.chars().take(MAX_MESSAGE_LEN - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> NewAuditRecord {
        NewAuditRecord {
            message: "Widget".into(),
            username: "alice".into(),
            created_on: None,
            operation_id: 2,
            target: "Product".into(),
            target_values: Some("price: 10 -> 12".into()),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_empty_username_is_missing_actor() {
        let mut record = valid_record();
        record.username = "   ".into();
        let err = record.validate().unwrap_err();
        assert!(matches!(err, TrailError::MissingActor(_)));
    }

    #[test]
    fn test_username_length_limit() {
        let mut record = valid_record();
        record.username = "u".repeat(MAX_USERNAME_LEN + 1);
        assert!(matches!(
            record.validate().unwrap_err(),
            TrailError::Validation(_)
        ));

        record.username = "u".repeat(MAX_USERNAME_LEN);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_message_length_limit() {
        let mut record = valid_record();
        record.message = "m".repeat(MAX_MESSAGE_LEN + 1);
        assert!(matches!(
            record.validate().unwrap_err(),
            TrailError::Validation(_)
        ));
    }

    #[test]
    fn test_target_limits() {
        let mut record = valid_record();
        record.target = String::new();
        assert!(record.validate().is_err());

        record.target = "t".repeat(MAX_TARGET_LEN + 1);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_target_values_length_limit() {
        let mut record = valid_record();
        record.target_values = Some("v".repeat(MAX_TARGET_VALUES_LEN + 1));
        assert!(record.validate().is_err());

        record.target_values = None;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_into_record_defaults_timestamp() {
        let before = Utc::now();
        let record = valid_record().into_record(7);
        assert_eq!(record.id, 7);
        assert!(record.created_on >= before);
    }

    #[test]
    fn test_into_record_keeps_explicit_timestamp() {
        let mut new_record = valid_record();
        let stamp = "2025-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        new_record.created_on = Some(stamp);

        let record = new_record.into_record(1);
        assert_eq!(record.created_on, stamp);
    }

    #[test]
    fn test_clamp_message() {
        assert_eq!(clamp_message("short"), "short");

        let long = "x".repeat(400);
        let clamped = clamp_message(&long);
        assert_eq!(clamped.chars().count(), MAX_MESSAGE_LEN);
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = valid_record().into_record(3);
        let json = serde_json::to_string(&record).unwrap();
        let back: AuditRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, 3);
        assert_eq!(back.username, "alice");
        assert_eq!(back.operation_id, 2);
    }

    #[test]
    fn test_none_target_values_omitted_from_json() {
        let mut new_record = valid_record();
        new_record.target_values = None;
        let json = serde_json::to_string(&new_record.into_record(1)).unwrap();
        assert!(!json.contains("target_values"));
    }
}
