//! Repositories for every consensus entity.
//!
//! Each module exposes crate-private free functions taking a
//! `libsql::Connection`, so they run unchanged on the plain connection or
//! inside an open write transaction. Read-only lookups are additionally
//! exposed on `LabelService` via `impl LabelService` blocks.

pub mod decision;
pub mod history;
pub mod prediction;
pub mod publication;
pub mod summary;
pub mod vote;
