//! The consensus engine: operations that mutate decisions, votes and
//! summaries, each run as one serialized unit of work on `LabelService`.
//!
//! - [`locator`] finds or creates the open decision a vote belongs to
//! - [`consensus`] recomputes the majority of a decision
//! - [`finalize`] closes a decision and projects it into the summary
//! - [`manual_override`] lets an expert confirm a clear majority early
//! - [`submit`] accepts a vote and drives the steps above
//! - [`statistics`] reports vote distributions
//! - [`register`] seeds a publication with its history and summary

pub mod consensus;
pub mod finalize;
pub mod locator;
pub mod manual_override;
pub mod register;
pub mod statistics;
pub mod submit;

pub use locator::VoteTarget;
pub use register::PublicationRecord;
pub use submit::{VoteReceipt, VoteRequest};
