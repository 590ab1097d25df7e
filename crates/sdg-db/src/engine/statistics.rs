//! Vote statistics for moderators.

use sdg_core::enums::EntityKind;
use sdg_core::statistics::VoteStatistics;

use crate::error::LabelError;
use crate::repos::{decision, vote};
use crate::service::LabelService;

impl LabelService {
    /// Label distributions and per-user histories for a decision.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the decision does not exist.
    pub async fn get_statistics(&self, decision_id: &str) -> Result<VoteStatistics, LabelError> {
        let conn = self.db().conn();
        let target = decision::get(conn, decision_id, &self.thresholds())
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))?;
        let votes = vote::for_decision(conn, decision_id).await?;
        Ok(VoteStatistics::from_votes(
            target.id,
            target.scenario,
            &votes,
        ))
    }
}
