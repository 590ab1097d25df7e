//! Scenario classification of a de-duplicated label distribution.
//!
//! Checks run in a fixed order and the first match wins:
//!
//! ```text
//! count < votes_needed                         -> NotEnoughVotes
//! top > total * 0.5                            -> Confirm
//! 2 labels, both == total / 2                  -> Tiebreaker
//! >= 3 labels, top two >= total * significant  -> Investigate
//! >= 3 labels, top <= total * significant      -> Explore
//! otherwise                                    -> NoSpecificScenario
//! ```

use serde::{Deserialize, Serialize};

use super::aggregate::label_counts;
use crate::enums::Scenario;
use crate::label::SdgLabel;

/// Share of the votes a label needs to exceed for an absolute majority.
pub const MAJORITY_SHARE: f64 = 0.5;

/// Slack for comparisons against the significance threshold, which is a
/// configured fraction and not exactly representable.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Thresholds for [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioThresholds {
    /// Minimum number of distinct voters before any scenario is reported.
    pub votes_needed: usize,
    /// Fraction of the votes that makes a label significant.
    pub significant_threshold: f64,
}

impl Default for ScenarioThresholds {
    fn default() -> Self {
        Self {
            votes_needed: 5,
            significant_threshold: 0.3,
        }
    }
}

/// Classify the latest label of each user.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify(labels: &[SdgLabel], thresholds: &ScenarioThresholds) -> Scenario {
    if labels.is_empty() || labels.len() < thresholds.votes_needed {
        return Scenario::NotEnoughVotes;
    }

    let counts = label_counts(labels);
    let total = labels.len();
    let majority = total as f64 * MAJORITY_SHARE;
    let significant = total as f64 * thresholds.significant_threshold;
    let top = counts[0].1 as f64;

    if top > majority {
        return Scenario::Confirm;
    }

    if counts.len() == 2 && counts.iter().all(|(_, count)| count * 2 == total) {
        return Scenario::Tiebreaker;
    }

    if counts.len() >= 3 {
        let second = counts[1].1 as f64;
        if top + THRESHOLD_EPSILON >= significant && second + THRESHOLD_EPSILON >= significant {
            return Scenario::Investigate;
        }
        if top <= significant + THRESHOLD_EPSILON {
            return Scenario::Explore;
        }
    }

    Scenario::NoSpecificScenario
}
