//! Error types for sdg-db.
//!
//! `DatabaseError` covers storage failures. `LabelError` is the engine-level
//! taxonomy returned by `LabelService`: business-rule violations are typed
//! variants, storage conflicts become `ConcurrentModification` (retried by the
//! service), and everything else is a fatal `Persistence` error.

use sdg_core::enums::EntityKind;
use sdg_core::errors::CoreError;
use sdg_core::label::SdgLabel;
use thiserror::Error;

use crate::retry::is_conflict;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A unit of work kept conflicting with concurrent writers.
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        Self::InvalidState(err.to_string())
    }
}

/// Errors returned by the consensus engine.
#[derive(Debug, Error)]
pub enum LabelError {
    /// A referenced publication, decision, history or summary does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Manual confirmation attempted outside the Confirm scenario.
    #[error("Manual confirmation not allowed for decision {decision_id}: {reason}")]
    InvalidOverrideContext { decision_id: String, reason: String },

    /// The confirmed label is not the computed majority.
    #[error(
        "Confirmed label {confirmed} does not match the majority ({}) of decision {decision_id}",
        display_majority(.majority)
    )]
    OverrideMismatch {
        decision_id: String,
        confirmed: SdgLabel,
        majority: Option<SdgLabel>,
    },

    /// Caller supplied an invalid value.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lock or uniqueness conflict with a concurrent writer. Retried by the
    /// service before it ever reaches a caller.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    /// Storage failure; the transaction was rolled back.
    #[error("Persistence failure: {0}")]
    Persistence(DatabaseError),
}

impl LabelError {
    pub(crate) fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<DatabaseError> for LabelError {
    fn from(err: DatabaseError) -> Self {
        if is_conflict(&err) {
            Self::ConcurrentModification(err.to_string())
        } else {
            Self::Persistence(err)
        }
    }
}

impl From<libsql::Error> for LabelError {
    fn from(err: libsql::Error) -> Self {
        DatabaseError::from(err).into()
    }
}

impl From<CoreError> for LabelError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}

fn display_majority(majority: &Option<SdgLabel>) -> String {
    majority.map_or_else(|| "no majority".to_string(), |label| label.to_string())
}
