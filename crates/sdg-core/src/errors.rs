//! Cross-cutting error types for the consensus engine.
//!
//! Errors that can originate from any crate in the workspace. Persistence and
//! engine errors (`DatabaseError`, `LabelError`) live in `sdg-db`, which
//! converts these with `From`.

use thiserror::Error;

/// Errors that can be raised by any `sdg-*` crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (label range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
