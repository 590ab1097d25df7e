//! Vote statistics for a decision.
//!
//! Two distributions are reported side by side: one over every vote ever
//! attached (the audit trail) and one over the latest vote per user (what
//! consensus actually counts). Per-user label histories expose drift.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::consensus::aggregate::latest_votes;
use crate::entities::Vote;
use crate::enums::Scenario;
use crate::label::SdgLabel;

/// Frequency of one label and the users who contributed to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LabelTally {
    pub label: SdgLabel,
    pub count: usize,
    /// In vote order; a user appears once per counted vote.
    pub user_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteStatistics {
    pub decision_id: String,
    pub scenario: Scenario,
    /// Over the latest vote per user, sorted by label.
    pub label_distribution: Vec<LabelTally>,
    /// Over every attached vote, sorted by label.
    pub total_label_distribution: Vec<LabelTally>,
    /// Every label each user has voted, in attach order.
    pub user_voting_details: BTreeMap<String, Vec<SdgLabel>>,
    pub latest_votes_full: Vec<Vote>,
}

impl VoteStatistics {
    /// Build statistics from the votes attached to a decision, in attach order.
    #[must_use]
    pub fn from_votes(decision_id: impl Into<String>, scenario: Scenario, votes: &[Vote]) -> Self {
        let latest: Vec<Vote> = latest_votes(votes).into_iter().cloned().collect();

        let mut user_voting_details: BTreeMap<String, Vec<SdgLabel>> = BTreeMap::new();
        for vote in votes {
            user_voting_details
                .entry(vote.user_id.clone())
                .or_default()
                .push(vote.voted_label);
        }

        Self {
            decision_id: decision_id.into(),
            scenario,
            label_distribution: tally(latest.iter()),
            total_label_distribution: tally(votes.iter()),
            user_voting_details,
            latest_votes_full: latest,
        }
    }
}

fn tally<'a>(votes: impl Iterator<Item = &'a Vote>) -> Vec<LabelTally> {
    let mut by_label: BTreeMap<SdgLabel, LabelTally> = BTreeMap::new();
    for vote in votes {
        let entry = by_label.entry(vote.voted_label).or_insert_with(|| LabelTally {
            label: vote.voted_label,
            count: 0,
            user_ids: Vec::new(),
        });
        entry.count += 1;
        entry.user_ids.push(vote.user_id.clone());
    }
    by_label.into_values().collect()
}
