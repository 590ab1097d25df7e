//! Vote submission: locate, store, attach, recompute, classify, commit.

use chrono::Utc;
use libsql::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sdg_core::consensus::ConsensusOutcome;
use sdg_core::entities::Vote;
use sdg_core::enums::Scenario;
use sdg_core::ids::PREFIX_VOTE;
use sdg_core::label::SdgLabel;

use super::locator::VoteTarget;
use crate::error::LabelError;
use crate::repos::{decision, vote};
use crate::service::{LabelService, finish};

/// A user's vote on a decision or on a publication's open decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub user_id: String,
    pub target: VoteTarget,
    pub voted_label: SdgLabel,
    #[serde(default)]
    pub proposed_label: Option<SdgLabel>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl VoteRequest {
    #[must_use]
    pub fn new(user_id: impl Into<String>, target: VoteTarget, voted_label: SdgLabel) -> Self {
        Self {
            user_id: user_id.into(),
            target,
            voted_label,
            proposed_label: None,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// A label the voter suggests instead of, or in addition to, their vote.
    #[must_use]
    pub const fn with_proposed_label(mut self, label: SdgLabel) -> Self {
        self.proposed_label = Some(label);
        self
    }
}

/// What happened to a submitted vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub decision_id: String,
    pub outcome: ConsensusOutcome,
    /// Scenario of the decision after this vote.
    pub scenario: Scenario,
}

impl LabelService {
    /// Store a vote and recompute consensus for its decision, atomically.
    ///
    /// Either the vote, the decision it may have created, the finalization
    /// and the summary projection all commit, or none of them do. Votes on an
    /// already decided decision are kept for the audit trail and never
    /// reopen it.
    ///
    /// # Errors
    ///
    /// `LabelError::Validation` for a blank user id, plus every error of
    /// [`LabelService::locate_decision`].
    pub async fn submit_vote(&self, request: VoteRequest) -> Result<VoteReceipt, LabelError> {
        if request.user_id.trim().is_empty() {
            return Err(LabelError::Validation("user id must not be empty".into()));
        }
        let request = &request;
        self.write("submit_vote", move || self.submit_vote_once(request))
            .await
    }

    async fn submit_vote_once(&self, request: &VoteRequest) -> Result<VoteReceipt, LabelError> {
        let tx = self.begin().await?;
        let result = self.submit_vote_in(&tx, request).await;
        finish(tx, result).await
    }

    async fn submit_vote_in(
        &self,
        conn: &Connection,
        request: &VoteRequest,
    ) -> Result<VoteReceipt, LabelError> {
        let located = self.locate_in(conn, &request.target).await?;
        let decision_id = located.decision.id.clone();

        let vote = Vote {
            id: crate::generate_id(conn, PREFIX_VOTE).await?,
            user_id: request.user_id.clone(),
            publication_id: located.history.publication_id.clone(),
            voted_label: request.voted_label,
            proposed_label: request.proposed_label,
            comment: request.comment.clone(),
            voted_at: Utc::now(),
        };
        vote::insert(conn, &vote).await?;
        vote::attach(conn, &decision_id, &vote.id).await?;
        debug!(
            vote_id = %vote.id,
            decision_id = %decision_id,
            user_id = %vote.user_id,
            label = %vote.voted_label,
            "Vote attached"
        );

        let outcome = self.recompute_in(conn, &located.decision).await?;

        let votes = vote::for_decision(conn, &decision_id).await?;
        let scenario = decision::scenario_of(&votes, &self.thresholds());
        info!(
            decision_id = %decision_id,
            publication_id = %vote.publication_id,
            %scenario,
            ?outcome,
            "Vote submitted"
        );

        Ok(VoteReceipt {
            vote,
            decision_id,
            outcome,
            scenario,
        })
    }
}
