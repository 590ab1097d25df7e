//! Find-or-create of the open decision a vote is attached to.

use chrono::Utc;
use libsql::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sdg_core::entities::{Decision, History};
use sdg_core::enums::EntityKind;
use sdg_core::ids::PREFIX_DECISION;

use crate::error::LabelError;
use crate::repos::{decision, history, prediction, publication, summary};
use crate::service::{LabelService, finish};

/// What a vote is cast on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum VoteTarget {
    /// An explicit decision.
    Decision(String),
    /// The current open decision of a publication, created if needed.
    Publication(String),
}

/// A located decision together with the history it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct Located {
    pub decision: Decision,
    pub history: History,
}

impl LabelService {
    /// Resolve a vote target to a decision.
    ///
    /// For a publication with an active history this returns its most recent
    /// open decision. When none is open, or the history is inactive, a new
    /// decision seeded with the configured model's highest-confidence SDG is
    /// created and the history is marked active.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` for a missing decision, publication, summary or
    /// history.
    pub async fn locate_decision(&self, target: &VoteTarget) -> Result<Decision, LabelError> {
        self.write("locate_decision", move || self.locate_decision_once(target))
            .await
    }

    async fn locate_decision_once(&self, target: &VoteTarget) -> Result<Decision, LabelError> {
        let tx = self.begin().await?;
        let result = self.locate_in(&tx, target).await.map(|l| l.decision);
        finish(tx, result).await
    }

    /// Locate inside the caller's transaction, so a new decision and the
    /// vote attached to it commit together.
    pub(crate) async fn locate_in(
        &self,
        conn: &Connection,
        target: &VoteTarget,
    ) -> Result<Located, LabelError> {
        match target {
            VoteTarget::Decision(decision_id) => {
                let decision = decision::get(conn, decision_id, &self.thresholds())
                    .await?
                    .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))?;
                let history = history::get(conn, &decision.history_id)
                    .await?
                    .ok_or_else(|| LabelError::not_found(EntityKind::History, &decision.history_id))?;
                Ok(Located { decision, history })
            }
            VoteTarget::Publication(publication_id) => {
                self.open_decision_for(conn, publication_id).await
            }
        }
    }

    async fn open_decision_for(
        &self,
        conn: &Connection,
        publication_id: &str,
    ) -> Result<Located, LabelError> {
        if publication::get(conn, publication_id).await?.is_none() {
            return Err(LabelError::not_found(EntityKind::Publication, publication_id));
        }
        if summary::get_for_publication(conn, publication_id).await?.is_none() {
            return Err(LabelError::not_found(EntityKind::Summary, publication_id));
        }
        let mut history = history::get_for_publication(conn, publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::History, publication_id))?;

        if history.active
            && let Some(open) =
                decision::open_for_history(conn, &history.id, &self.thresholds()).await?
        {
            debug!(decision_id = %open.id, publication_id, "Reusing open decision");
            return Ok(Located {
                decision: open,
                history,
            });
        }

        let suggested = prediction::highest_confidence(conn, publication_id, self.prediction_model())
            .await?
            .map(|(label, _)| label);
        let id = crate::generate_id(conn, PREFIX_DECISION).await?;
        let decision = decision::insert_open(conn, &id, &history.id, suggested, Utc::now()).await?;
        if !history.active {
            history::set_active(conn, &history.id, true).await?;
            history.active = true;
        }
        debug!(
            decision_id = %decision.id,
            publication_id,
            suggested = ?decision.suggested_label,
            "Opened decision"
        );
        Ok(Located { decision, history })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use sdg_core::enums::DecisionType;

    use super::*;
    use crate::engine::finalize::Finalization;
    use crate::test_support::helpers::{label, seeded_publication, test_service};

    #[tokio::test]
    async fn creates_then_reuses_open_decision() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let target = VoteTarget::Publication(pub_id.clone());

        let first = svc.locate_decision(&target).await.unwrap();
        let second = svc.locate_decision(&target).await.unwrap();
        assert_eq!(first.id, second.id);
        assert!(first.is_open());
        assert_eq!(svc.list_decisions(&pub_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeds_suggested_label_from_configured_model() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        svc.record_prediction(&pub_id, "aurora", label(7), 0.4).await.unwrap();
        svc.record_prediction(&pub_id, "aurora", label(2), 0.8).await.unwrap();
        svc.record_prediction(&pub_id, "legacy", label(9), 0.95).await.unwrap();

        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id))
            .await
            .unwrap();
        assert_eq!(decision.suggested_label, Some(label(2)));
    }

    #[tokio::test]
    async fn missing_prediction_leaves_suggestion_empty() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id))
            .await
            .unwrap();
        assert_eq!(decision.suggested_label, None);
    }

    #[tokio::test]
    async fn unknown_targets_are_not_found() {
        let svc = test_service().await;

        let err = svc
            .locate_decision(&VoteTarget::Decision("dec-none".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LabelError::NotFound {
                entity: EntityKind::Decision,
                ..
            }
        ));

        let err = svc
            .locate_decision(&VoteTarget::Publication("pub-none".into()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LabelError::NotFound {
                entity: EntityKind::Publication,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unseeded_publication_reports_missing_summary() {
        let svc = test_service().await;
        svc.db()
            .conn()
            .execute("INSERT INTO publications (id, title) VALUES ('pub-bare', 't')", ())
            .await
            .unwrap();

        let err = svc
            .locate_decision(&VoteTarget::Publication("pub-bare".into()))
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

    async fn finalize(svc: &LabelService, decision: &Decision, value: u8) {
        let fin = Finalization {
            label: label(value),
            decision_type: DecisionType::ConsensusMajority,
            expert_id: None,
            comment: None,
            decided_at: Utc::now(),
        };
        svc.finalize_in(svc.db().conn(), decision, &fin).await.unwrap();
    }

    #[tokio::test]
    async fn inactive_history_gets_a_fresh_decision() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let target = VoteTarget::Publication(pub_id.clone());
        let first = svc.locate_decision(&target).await.unwrap();
        finalize(&svc, &first, 3).await;
        assert!(!svc.get_history(&pub_id).await.unwrap().active);

        let fresh = svc.locate_decision(&target).await.unwrap();
        assert_ne!(fresh.id, first.id);
        assert!(fresh.is_open());
        assert!(svc.get_history(&pub_id).await.unwrap().active);

        // Active again, so the next vote joins the fresh decision.
        let again = svc.locate_decision(&target).await.unwrap();
        assert_eq!(again.id, fresh.id);
        assert_eq!(svc.list_decisions(&pub_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn manually_deactivated_history_is_not_an_error() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        svc.set_history_active(&pub_id, false).await.unwrap();

        let decision = svc
            .locate_decision(&VoteTarget::Publication(pub_id.clone()))
            .await
            .unwrap();
        assert!(decision.is_open());
        assert!(svc.get_history(&pub_id).await.unwrap().active);
    }

    #[tokio::test]
    async fn explicit_decision_ignores_history_flag() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let decided = svc
            .locate_decision(&VoteTarget::Publication(pub_id.clone()))
            .await
            .unwrap();
        finalize(&svc, &decided, 8).await;

        let located = svc
            .locate_decision(&VoteTarget::Decision(decided.id.clone()))
            .await
            .unwrap();
        assert_eq!(located.id, decided.id);
        assert!(!svc.get_history(&pub_id).await.unwrap().active);
    }

    #[tokio::test]
    async fn concurrent_locate_creates_one_decision() {
        let svc = Arc::new(test_service().await);
        let pub_id = seeded_publication(&svc).await;
        let target = VoteTarget::Publication(pub_id.clone());

        let (a, b) = tokio::join!(svc.locate_decision(&target), svc.locate_decision(&target));
        assert_eq!(a.unwrap().id, b.unwrap().id);

        let open: Vec<_> = svc
            .list_decisions(&pub_id)
            .await
            .unwrap()
            .into_iter()
            .filter(Decision::is_open)
            .collect();
        assert_eq!(open.len(), 1);
    }
}
