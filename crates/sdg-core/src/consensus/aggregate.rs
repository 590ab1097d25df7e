//! Vote aggregation: the latest vote per user is the one that counts.

use std::collections::{BTreeMap, HashMap};

use crate::entities::Vote;
use crate::label::SdgLabel;

/// The latest vote of each user, in order of each user's first appearance.
///
/// The vote with the greatest `voted_at` wins. Equal timestamps are resolved
/// by position: the later vote in `votes` wins.
#[must_use]
pub fn latest_votes(votes: &[Vote]) -> Vec<&Vote> {
    let mut slot_by_user: HashMap<&str, usize> = HashMap::new();
    let mut latest: Vec<&Vote> = Vec::new();

    for vote in votes {
        match slot_by_user.get(vote.user_id.as_str()).copied() {
            Some(slot) => {
                if vote.voted_at >= latest[slot].voted_at {
                    latest[slot] = vote;
                }
            }
            None => {
                slot_by_user.insert(vote.user_id.as_str(), latest.len());
                latest.push(vote);
            }
        }
    }

    latest
}

/// `user_id -> label` for the latest vote of every user.
#[must_use]
pub fn latest_per_user(votes: &[Vote]) -> BTreeMap<String, SdgLabel> {
    latest_votes(votes)
        .into_iter()
        .map(|vote| (vote.user_id.clone(), vote.voted_label))
        .collect()
}

/// De-duplicated label list, one entry per user.
#[must_use]
pub fn latest_labels(votes: &[Vote]) -> Vec<SdgLabel> {
    latest_votes(votes)
        .into_iter()
        .map(|vote| vote.voted_label)
        .collect()
}

/// Frequency per label, highest count first, ties by ascending label.
#[must_use]
pub fn label_counts(labels: &[SdgLabel]) -> Vec<(SdgLabel, usize)> {
    let mut counts: BTreeMap<SdgLabel, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(*label).or_insert(0) += 1;
    }
    let mut sorted: Vec<(SdgLabel, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}
