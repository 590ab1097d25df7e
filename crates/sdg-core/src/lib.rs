//! # sdg-core
//!
//! Core types, consensus algorithms, and error types for the SDG label
//! consensus engine.
//!
//! This crate provides the foundational types shared across all `sdg-*` crates:
//! - The validated [`label::SdgLabel`] (SDG 1-17 plus the null class 18)
//! - Entity structs for votes, decisions, histories, summaries and publications
//! - Decision types, scenarios and summary marks
//! - ID prefix constants
//! - Cross-cutting error types
//! - The pure consensus algorithms (vote aggregation, scenario classification,
//!   majority evaluation) and vote statistics
//!
//! Nothing in here performs I/O. Persistence and orchestration live in `sdg-db`.

pub mod consensus;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod label;
pub mod statistics;
