//! Expert confirmation of a clear majority before the vote threshold is met.

use chrono::Utc;
use libsql::Connection;
use tracing::info;

use sdg_core::consensus::{latest_labels, majority_label};
use sdg_core::entities::Decision;
use sdg_core::enums::{DecisionType, EntityKind, Scenario};
use sdg_core::label::SdgLabel;

use super::finalize::Finalization;
use crate::error::LabelError;
use crate::repos::{decision, vote};
use crate::service::{LabelService, finish};

impl LabelService {
    /// Finalize an open decision as an expert decision.
    ///
    /// The confirmed label must equal the majority of the latest votes; this
    /// is checked before anything else, so a mismatch fails whatever the
    /// scenario. The decision must then still be an open consensus decision
    /// in the `Confirm` scenario.
    ///
    /// # Errors
    ///
    /// - `LabelError::NotFound` if the decision does not exist
    /// - `LabelError::OverrideMismatch` if there is no majority or it differs
    /// - `LabelError::InvalidOverrideContext` outside the `Confirm` scenario
    pub async fn manual_confirm(
        &self,
        decision_id: &str,
        acting_user_id: &str,
        confirmed_label: SdgLabel,
        comment: Option<&str>,
    ) -> Result<Decision, LabelError> {
        if acting_user_id.trim().is_empty() {
            return Err(LabelError::Validation("acting user id must not be empty".into()));
        }
        self.write("manual_confirm", move || {
            self.manual_confirm_once(decision_id, acting_user_id, confirmed_label, comment)
        })
        .await
    }

    async fn manual_confirm_once(
        &self,
        decision_id: &str,
        acting_user_id: &str,
        confirmed_label: SdgLabel,
        comment: Option<&str>,
    ) -> Result<Decision, LabelError> {
        let tx = self.begin().await?;
        let result = self
            .manual_confirm_in(&tx, decision_id, acting_user_id, confirmed_label, comment)
            .await;
        finish(tx, result).await
    }

    async fn manual_confirm_in(
        &self,
        conn: &Connection,
        decision_id: &str,
        acting_user_id: &str,
        confirmed_label: SdgLabel,
        comment: Option<&str>,
    ) -> Result<Decision, LabelError> {
        let thresholds = self.thresholds();
        let target = decision::get(conn, decision_id, &thresholds)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))?;
        let votes = vote::for_decision(conn, decision_id).await?;

        let majority = majority_label(&latest_labels(&votes));
        if majority != Some(confirmed_label) {
            return Err(LabelError::OverrideMismatch {
                decision_id: decision_id.to_string(),
                confirmed: confirmed_label,
                majority,
            });
        }

        let refuse = |reason: String| LabelError::InvalidOverrideContext {
            decision_id: decision_id.to_string(),
            reason,
        };
        if target.decision_type != DecisionType::ConsensusMajority {
            return Err(refuse(format!(
                "decision type is {}",
                target.decision_type
            )));
        }
        if let Some(decided) = target.decided_label {
            return Err(refuse(format!("already decided as {decided}")));
        }
        if target.scenario != Scenario::Confirm {
            return Err(refuse(format!("scenario is {}", target.scenario)));
        }

        self.finalize_in(
            conn,
            &target,
            &Finalization {
                label: confirmed_label,
                decision_type: DecisionType::ExpertDecision,
                expert_id: Some(acting_user_id),
                comment,
                decided_at: Utc::now(),
            },
        )
        .await?;
        info!(decision_id, expert_id = acting_user_id, "Majority confirmed manually");

        decision::get(conn, decision_id, &thresholds)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))
    }
}
