//! Recompute the majority of a decision from its attached votes.

use chrono::Utc;
use libsql::Connection;
use tracing::debug;

use sdg_core::consensus::{ConsensusOutcome, evaluate, latest_labels};
use sdg_core::entities::Decision;
use sdg_core::enums::{DecisionType, EntityKind};

use super::finalize::Finalization;
use crate::error::LabelError;
use crate::repos::{decision, vote};
use crate::service::{LabelService, finish};

impl LabelService {
    /// Recompute consensus for a decision, finalizing it when a label holds
    /// an absolute majority of the latest votes.
    ///
    /// Safe to call repeatedly: a decided decision is never reopened or
    /// changed and reports `AlreadyDecided`.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the decision (or, on finalization, its
    /// summary) does not exist.
    pub async fn recompute(&self, decision_id: &str) -> Result<ConsensusOutcome, LabelError> {
        self.write("recompute", move || self.recompute_once(decision_id))
            .await
    }

    async fn recompute_once(&self, decision_id: &str) -> Result<ConsensusOutcome, LabelError> {
        let tx = self.begin().await?;
        let result = self.recompute_by_id_in(&tx, decision_id).await;
        finish(tx, result).await
    }

    async fn recompute_by_id_in(
        &self,
        conn: &Connection,
        decision_id: &str,
    ) -> Result<ConsensusOutcome, LabelError> {
        let decision = decision::get(conn, decision_id, &self.thresholds())
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))?;
        self.recompute_in(conn, &decision).await
    }

    pub(crate) async fn recompute_in(
        &self,
        conn: &Connection,
        decision: &Decision,
    ) -> Result<ConsensusOutcome, LabelError> {
        if let Some(label) = decision.decided_label {
            return Ok(ConsensusOutcome::AlreadyDecided { label });
        }

        let votes = vote::for_decision(conn, &decision.id).await?;
        let labels = latest_labels(&votes);
        let outcome = evaluate(&labels, self.consensus().votes_needed_for_consensus);
        debug!(decision_id = %decision.id, ?outcome, "Consensus recomputed");

        if let ConsensusOutcome::Majority { label, .. } = outcome {
            self.finalize_in(
                conn,
                decision,
                &Finalization {
                    label,
                    decision_type: DecisionType::ConsensusMajority,
                    expert_id: None,
                    comment: None,
                    decided_at: Utc::now(),
                },
            )
            .await?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sdg_core::consensus::ConsensusOutcome;
    use sdg_core::enums::SummaryMark;

    use crate::engine::VoteTarget;
    use crate::test_support::helpers::{attach_votes, label, seeded_publication, service_with};

    #[tokio::test]
    async fn majority_of_five_finalizes() {
        let svc = service_with(5, 5).await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id.clone()))
            .await
            .unwrap();
        attach_votes(&svc, &decision.id, &[("a", 1), ("b", 1), ("c", 1), ("d", 2), ("e", 2)]).await;

        let outcome = svc.recompute(&decision.id).await.unwrap();
        assert_eq!(
            outcome,
            ConsensusOutcome::Majority {
                label: label(1),
                count: 3,
                total: 5
            }
        );
        let decided = svc.get_decision(&decision.id).await.unwrap();
        assert_eq!(decided.decided_label, Some(label(1)));
        let summary = svc.get_summary(&pub_id).await.unwrap();
        assert_eq!(summary.mark(label(1)), Some(SummaryMark::Confirmed));
    }

    #[tokio::test]
    async fn plurality_is_not_enough() {
        let svc = service_with(5, 5).await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id))
            .await
            .unwrap();
        attach_votes(&svc, &decision.id, &[("a", 1), ("b", 1), ("c", 2), ("d", 2), ("e", 3)]).await;

        let outcome = svc.recompute(&decision.id).await.unwrap();
        assert_eq!(
            outcome,
            ConsensusOutcome::NoMajority {
                total: 5,
                top_count: 2
            }
        );
        assert!(svc.get_decision(&decision.id).await.unwrap().is_open());
    }

    #[tokio::test]
    async fn recompute_is_idempotent() {
        let svc = service_with(3, 3).await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id.clone()))
            .await
            .unwrap();
        attach_votes(&svc, &decision.id, &[("a", 4), ("b", 4), ("c", 4)]).await;

        svc.recompute(&decision.id).await.unwrap();
        let after_first = svc.get_decision(&decision.id).await.unwrap();
        let summary_first = svc.get_summary(&pub_id).await.unwrap();

        let outcome = svc.recompute(&decision.id).await.unwrap();
        assert_eq!(outcome, ConsensusOutcome::AlreadyDecided { label: label(4) });
        assert_eq!(svc.get_decision(&decision.id).await.unwrap(), after_first);
        assert_eq!(svc.get_summary(&pub_id).await.unwrap(), summary_first);
    }

    #[tokio::test]
    async fn open_recompute_is_idempotent() {
        let svc = service_with(5, 5).await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id))
            .await
            .unwrap();
        attach_votes(&svc, &decision.id, &[("a", 4), ("b", 4)]).await;

        let first = svc.recompute(&decision.id).await.unwrap();
        let before = svc.get_decision(&decision.id).await.unwrap();
        let second = svc.recompute(&decision.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.get_decision(&decision.id).await.unwrap(), before);
    }
}
