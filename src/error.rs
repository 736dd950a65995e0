//! Custom error types for trailkeeper
//!
//! This module defines the error hierarchy for the audit engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for trailkeeper operations
#[derive(Error, Debug)]
pub enum TrailError {
    /// Malformed snapshot input handed to the diff engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Entity could not be turned into a snapshot
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No actor identity was available at hook time
    #[error("Missing actor identity: {0}")]
    MissingActor(String),

    /// The store failed to append a record
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Record or catalog entry not found
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for record fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl TrailError {
    /// Create a "not found" error for audit records
    pub fn record_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Audit record",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for operation kinds
    pub fn operation_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Operation",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TrailError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrailError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for trailkeeper operations
pub type TrailResult<T> = Result<T, TrailError>;
