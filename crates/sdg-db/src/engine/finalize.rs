//! Closing a decision and projecting its label into the summary.

use libsql::Connection;
use tracing::info;

use sdg_core::entities::{Decision, Summary};
use sdg_core::enums::EntityKind;

use crate::error::LabelError;
use crate::repos::{decision, history, summary};
use crate::service::LabelService;

pub(crate) use crate::repos::decision::Finalization;

impl LabelService {
    /// Persist the final label of an open decision and apply it to the
    /// publication's summary.
    ///
    /// The null class excludes every SDG; any other label confirms its own
    /// SDG and leaves earlier confirmations in place. The history is marked
    /// inactive so the next vote on the publication opens a new decision.
    pub(crate) async fn finalize_in(
        &self,
        conn: &Connection,
        target: &Decision,
        fin: &Finalization<'_>,
    ) -> Result<Summary, LabelError> {
        decision::finalize(conn, &target.id, fin).await?;

        let history = history::get(conn, &target.history_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::History, &target.history_id))?;
        let mut summary = summary::get_for_publication(conn, &history.publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Summary, &history.publication_id))?;

        summary.apply(fin.label);
        summary::save_marks(conn, &summary).await?;
        history::set_active(conn, &history.id, false).await?;

        info!(
            decision_id = %target.id,
            publication_id = %history.publication_id,
            label = %fin.label,
            decision_type = %fin.decision_type,
            "Decision finalized"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use sdg_core::enums::{DecisionType, SummaryMark};
    use sdg_core::label::{SDG_COUNT, SdgLabel};

    use super::*;
    use crate::engine::VoteTarget;
    use crate::test_support::helpers::{label, seeded_publication, test_service};

    fn consensus(label: SdgLabel) -> Finalization<'static> {
        Finalization {
            label,
            decision_type: DecisionType::ConsensusMajority,
            expert_id: None,
            comment: None,
            decided_at: Utc::now(),
        }
    }

    async fn finalize_new_round(svc: &LabelService, pub_id: &str, value: SdgLabel) -> Summary {
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id.to_string()))
            .await
            .unwrap();
        svc.finalize_in(svc.db().conn(), &decision, &consensus(value))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn null_class_excludes_every_sdg() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let summary = finalize_new_round(&svc, &pub_id, SdgLabel::NOT_RELEVANT).await;
        assert_eq!(summary.marks, [SummaryMark::Excluded; SDG_COUNT]);
        assert_eq!(svc.get_summary(&pub_id).await.unwrap(), summary);
    }

    #[tokio::test]
    async fn label_touches_only_its_sdg() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let summary = finalize_new_round(&svc, &pub_id, label(9)).await;

        let mut expected = [SummaryMark::Undecided; SDG_COUNT];
        expected[8] = SummaryMark::Confirmed;
        assert_eq!(summary.marks, expected);
    }

    #[tokio::test]
    async fn later_decisions_add_confirmations() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        finalize_new_round(&svc, &pub_id, label(3)).await;
        let summary = finalize_new_round(&svc, &pub_id, label(9)).await;

        assert_eq!(summary.confirmed_sdgs(), vec![3, 9]);
        assert_eq!(svc.list_decisions(&pub_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn finalizing_deactivates_history() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        assert!(svc.get_history(&pub_id).await.unwrap().active);

        finalize_new_round(&svc, &pub_id, label(4)).await;
        assert!(!svc.get_history(&pub_id).await.unwrap().active);
    }

    #[tokio::test]
    async fn confirmation_after_exclusion_keeps_other_exclusions() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        finalize_new_round(&svc, &pub_id, SdgLabel::NOT_RELEVANT).await;
        let summary = finalize_new_round(&svc, &pub_id, label(5)).await;

        let mut expected = [SummaryMark::Excluded; SDG_COUNT];
        expected[4] = SummaryMark::Confirmed;
        assert_eq!(summary.marks, expected);
    }

    #[tokio::test]
    async fn missing_summary_is_fatal() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id.clone()))
            .await
            .unwrap();
        svc.db()
            .conn()
            .execute("DELETE FROM summaries WHERE publication_id = ?1", [pub_id.as_str()])
            .await
            .unwrap();

        let err = svc
            .finalize_in(svc.db().conn(), &decision, &consensus(label(2)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LabelError::NotFound {
                entity: EntityKind::Summary,
                ..
            }
        ));
    }
}
