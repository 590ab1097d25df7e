//! Decision types, scenarios, summary marks and entity kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the text stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DecisionType
// ---------------------------------------------------------------------------

/// How a decision reached (or will reach) its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Absolute majority of the latest per-user votes.
    ConsensusMajority,
    /// Reserved for committee decisions made outside the vote count.
    ConsensusTechnocratic,
    /// A privileged user confirmed the majority label.
    ExpertDecision,
}

impl DecisionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConsensusMajority => "consensus_majority",
            Self::ConsensusTechnocratic => "consensus_technocratic",
            Self::ExpertDecision => "expert_decision",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Advisory classification of a vote distribution.
///
/// Used by moderation tooling and to gate manual confirmation. A scenario
/// never mutates a decision on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    NotEnoughVotes,
    /// One label holds an absolute majority.
    Confirm,
    /// Two labels split the votes exactly in half.
    Tiebreaker,
    /// Three or more labels, the top two both significant.
    Investigate,
    /// Three or more labels, none significant.
    Explore,
    NoSpecificScenario,
}

impl Scenario {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotEnoughVotes => "not_enough_votes",
            Self::Confirm => "confirm",
            Self::Tiebreaker => "tiebreaker",
            Self::Investigate => "investigate",
            Self::Explore => "explore",
            Self::NoSpecificScenario => "no_specific_scenario",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SummaryMark
// ---------------------------------------------------------------------------

/// Relevance of one SDG for a publication, stored as `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMark {
    /// Explicitly excluded (`-1`).
    Excluded,
    /// Not decided yet (`0`).
    #[default]
    Undecided,
    /// Confirmed relevant (`1`).
    Confirmed,
}

impl SummaryMark {
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Excluded => -1,
            Self::Undecided => 0,
            Self::Confirmed => 1,
        }
    }

    /// Decode the integer column value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for anything other than `-1`, `0` or `1`.
    pub fn from_i64(value: i64) -> Result<Self, CoreError> {
        match value {
            -1 => Ok(Self::Excluded),
            0 => Ok(Self::Undecided),
            1 => Ok(Self::Confirmed),
            other => Err(CoreError::Validation(format!(
                "summary mark must be -1, 0 or 1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for SummaryMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Entities that can be referenced by id and therefore be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Publication,
    Decision,
    History,
    Summary,
    Vote,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Decision => "decision",
            Self::History => "history",
            Self::Summary => "summary",
            Self::Vote => "vote",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
