//! Absolute-majority evaluation.
//!
//! A label wins when its count is strictly greater than half of the distinct
//! voters. "No majority yet" is an ordinary outcome, not an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::aggregate::label_counts;
use crate::label::SdgLabel;

/// Result of evaluating (or recomputing) consensus for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConsensusOutcome {
    /// Fewer distinct voters than required; the decision stays open.
    NotEnoughVotes { total: usize, needed: usize },
    /// Enough voters but no label above half; the decision stays open.
    NoMajority { total: usize, top_count: usize },
    /// `label` holds an absolute majority.
    Majority {
        label: SdgLabel,
        count: usize,
        total: usize,
    },
    /// The decision was already finalized and is left untouched.
    AlreadyDecided { label: SdgLabel },
}

impl ConsensusOutcome {
    /// The winning (or previously decided) label, if any.
    #[must_use]
    pub const fn decided_label(&self) -> Option<SdgLabel> {
        match self {
            Self::Majority { label, .. } | Self::AlreadyDecided { label } => Some(*label),
            Self::NotEnoughVotes { .. } | Self::NoMajority { .. } => None,
        }
    }
}

/// The label with `count * 2 > total`, regardless of any vote threshold.
#[must_use]
pub fn majority_label(labels: &[SdgLabel]) -> Option<SdgLabel> {
    let total = labels.len();
    label_counts(labels)
        .first()
        .filter(|(_, count)| count * 2 > total)
        .map(|(label, _)| *label)
}

/// Evaluate consensus over de-duplicated labels.
#[must_use]
pub fn evaluate(labels: &[SdgLabel], votes_needed: usize) -> ConsensusOutcome {
    let total = labels.len();
    if total == 0 || total < votes_needed {
        return ConsensusOutcome::NotEnoughVotes {
            total,
            needed: votes_needed,
        };
    }

    let counts = label_counts(labels);
    let (top_label, top_count) = counts[0];
    if top_count * 2 > total {
        ConsensusOutcome::Majority {
            label: top_label,
            count: top_count,
            total,
        }
    } else {
        ConsensusOutcome::NoMajority { total, top_count }
    }
}
