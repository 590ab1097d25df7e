//! Consensus thresholds.

use sdg_core::consensus::ScenarioThresholds;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_votes_needed_for_consensus() -> usize {
    5
}

const fn default_votes_needed_for_scenario() -> usize {
    5
}

const fn default_significant_threshold() -> f64 {
    0.3
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsensusConfig {
    /// Distinct voters required before a majority can finalize a decision.
    #[serde(default = "default_votes_needed_for_consensus")]
    pub votes_needed_for_consensus: usize,

    /// Distinct voters required before a scenario other than
    /// `not_enough_votes` is reported.
    #[serde(default = "default_votes_needed_for_scenario")]
    pub votes_needed_for_scenario: usize,

    /// Fraction of votes that makes a label significant (Investigate/Explore).
    #[serde(default = "default_significant_threshold")]
    pub significant_threshold: f64,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            votes_needed_for_consensus: default_votes_needed_for_consensus(),
            votes_needed_for_scenario: default_votes_needed_for_scenario(),
            significant_threshold: default_significant_threshold(),
        }
    }
}

impl ConsensusConfig {
    /// Thresholds for the scenario classifier.
    #[must_use]
    pub const fn scenario_thresholds(&self) -> ScenarioThresholds {
        ScenarioThresholds {
            votes_needed: self.votes_needed_for_scenario,
            significant_threshold: self.significant_threshold,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for zero vote counts or a
    /// significance threshold outside `(0, 1)`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.votes_needed_for_consensus == 0 {
            return Err(ConfigError::invalid(
                "consensus.votes_needed_for_consensus",
                "must be at least 1",
            ));
        }
        if self.votes_needed_for_scenario == 0 {
            return Err(ConfigError::invalid(
                "consensus.votes_needed_for_scenario",
                "must be at least 1",
            ));
        }
        if !(self.significant_threshold > 0.0 && self.significant_threshold < 1.0) {
            return Err(ConfigError::invalid(
                "consensus.significant_threshold",
                format!("must be between 0 and 1, got {}", self.significant_threshold),
            ));
        }
        Ok(())
    }
}
