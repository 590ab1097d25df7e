//! Decision repository.
//!
//! The scenario is never stored. Every read classifies the votes currently
//! attached to the decision.

use chrono::{DateTime, Utc};
use libsql::Connection;

use sdg_core::consensus::{ScenarioThresholds, classify, latest_labels};
use sdg_core::entities::{Decision, Vote};
use sdg_core::enums::{DecisionType, EntityKind, Scenario};
use sdg_core::label::SdgLabel;

use super::{history, vote};
use crate::error::{DatabaseError, LabelError};
use crate::helpers::{get_opt_label, get_opt_string, opt_label_value, parse_datetime, parse_enum};
use crate::service::LabelService;

const SELECT_COLS: &str = "id, history_id, suggested_label, decided_label, decision_type, \
                           expert_id, comment, decided_at, created_at";

/// Parse the stored columns. `scenario` is a placeholder until
/// [`with_scenario`] classifies the attached votes.
fn row_to_decision(row: &libsql::Row) -> Result<Decision, DatabaseError> {
    Ok(Decision {
        id: row.get(0)?,
        history_id: row.get(1)?,
        suggested_label: get_opt_label(row, 2)?,
        decided_label: get_opt_label(row, 3)?,
        decision_type: parse_enum(&row.get::<String>(4)?)?,
        scenario: Scenario::NotEnoughVotes,
        expert_id: get_opt_string(row, 5)?,
        comment: get_opt_string(row, 6)?,
        decided_at: parse_datetime(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Scenario of a vote set, over the latest vote per user.
pub(crate) fn scenario_of(votes: &[Vote], thresholds: &ScenarioThresholds) -> Scenario {
    classify(&latest_labels(votes), thresholds)
}

async fn with_scenario(
    conn: &Connection,
    mut decision: Decision,
    thresholds: &ScenarioThresholds,
) -> Result<Decision, DatabaseError> {
    let votes = vote::for_decision(conn, &decision.id).await?;
    decision.scenario = scenario_of(&votes, thresholds);
    Ok(decision)
}

async fn query_many(
    conn: &Connection,
    where_clause: &str,
    param: &str,
    thresholds: &ScenarioThresholds,
) -> Result<Vec<Decision>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM decisions WHERE {where_clause}
                 ORDER BY created_at, rowid"
            ),
            [param],
        )
        .await?;
    let mut parsed = Vec::new();
    while let Some(row) = rows.next().await? {
        parsed.push(row_to_decision(&row)?);
    }

    let mut decisions = Vec::with_capacity(parsed.len());
    for decision in parsed {
        decisions.push(with_scenario(conn, decision, thresholds).await?);
    }
    Ok(decisions)
}

pub(crate) async fn get(
    conn: &Connection,
    id: &str,
    thresholds: &ScenarioThresholds,
) -> Result<Option<Decision>, DatabaseError> {
    Ok(query_many(conn, "id = ?1", id, thresholds).await?.pop())
}

/// The open decision of a history, if one exists.
pub(crate) async fn open_for_history(
    conn: &Connection,
    history_id: &str,
    thresholds: &ScenarioThresholds,
) -> Result<Option<Decision>, DatabaseError> {
    Ok(
        query_many(conn, "history_id = ?1 AND decided_label = 0", history_id, thresholds)
            .await?
            .pop(),
    )
}

/// All decisions of a history, oldest first.
pub(crate) async fn list_for_history(
    conn: &Connection,
    history_id: &str,
    thresholds: &ScenarioThresholds,
) -> Result<Vec<Decision>, DatabaseError> {
    query_many(conn, "history_id = ?1", history_id, thresholds).await
}

/// Insert a new open decision.
pub(crate) async fn insert_open(
    conn: &Connection,
    id: &str,
    history_id: &str,
    suggested_label: Option<SdgLabel>,
    now: DateTime<Utc>,
) -> Result<Decision, DatabaseError> {
    let decision_type = DecisionType::ConsensusMajority;
    conn.execute(
        "INSERT INTO decisions (id, history_id, suggested_label, decided_label, decision_type, decided_at, created_at)
         VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6)",
        libsql::params![
            id,
            history_id,
            opt_label_value(suggested_label),
            decision_type.as_str(),
            now.to_rfc3339(),
            now.to_rfc3339()
        ],
    )
    .await?;
    Ok(Decision {
        id: id.to_string(),
        history_id: history_id.to_string(),
        suggested_label,
        decided_label: None,
        decision_type,
        scenario: Scenario::NotEnoughVotes,
        expert_id: None,
        comment: None,
        decided_at: now,
        created_at: now,
    })
}

/// Columns written when a decision is finalized.
#[derive(Debug, Clone)]
pub(crate) struct Finalization<'a> {
    pub label: SdgLabel,
    pub decision_type: DecisionType,
    pub expert_id: Option<&'a str>,
    pub comment: Option<&'a str>,
    pub decided_at: DateTime<Utc>,
}

/// Close an open decision. Fails if it was already decided.
pub(crate) async fn finalize(
    conn: &Connection,
    id: &str,
    fin: &Finalization<'_>,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE decisions
             SET decided_label = ?1, decision_type = ?2, expert_id = ?3, comment = ?4, decided_at = ?5
             WHERE id = ?6 AND decided_label = 0",
            libsql::params![
                i64::from(fin.label.value()),
                fin.decision_type.as_str(),
                fin.expert_id,
                fin.comment,
                fin.decided_at.to_rfc3339(),
                id
            ],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::InvalidState(format!(
            "decision {id} is not open"
        )));
    }
    Ok(())
}

impl LabelService {
    /// Fetch a decision with its scenario computed from the attached votes.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the decision does not exist.
    pub async fn get_decision(&self, decision_id: &str) -> Result<Decision, LabelError> {
        get(self.db().conn(), decision_id, &self.thresholds())
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Decision, decision_id))
    }

    /// The decision history of a publication, oldest first.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the publication has no history.
    pub async fn list_decisions(&self, publication_id: &str) -> Result<Vec<Decision>, LabelError> {
        let conn = self.db().conn();
        let history = history::get_for_publication(conn, publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::History, publication_id))?;
        Ok(list_for_history(conn, &history.id, &self.thresholds()).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{label, seeded_publication, test_service};

    #[tokio::test]
    async fn open_decision_round_trips() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let history = svc.get_history(&pub_id).await.unwrap();
        let conn = svc.db().conn();

        let created = insert_open(conn, "dec-1", &history.id, Some(label(5)), Utc::now())
            .await
            .unwrap();
        let fetched = svc.get_decision("dec-1").await.unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.is_open());

        let open = open_for_history(conn, &history.id, &svc.thresholds())
            .await
            .unwrap();
        assert_eq!(open.map(|d| d.id), Some("dec-1".to_string()));
    }

    #[tokio::test]
    async fn finalize_closes_once() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let history = svc.get_history(&pub_id).await.unwrap();
        let conn = svc.db().conn();
        insert_open(conn, "dec-1", &history.id, None, Utc::now())
            .await
            .unwrap();

        let fin = Finalization {
            label: label(18),
            decision_type: DecisionType::ExpertDecision,
            expert_id: Some("eve"),
            comment: Some("off topic"),
            decided_at: Utc::now(),
        };
        finalize(conn, "dec-1", &fin).await.unwrap();
        assert!(finalize(conn, "dec-1", &fin).await.is_err());

        let closed = svc.get_decision("dec-1").await.unwrap();
        assert_eq!(closed.decided_label, Some(label(18)));
        assert_eq!(closed.decision_type, DecisionType::ExpertDecision);
        assert_eq!(closed.expert_id.as_deref(), Some("eve"));
        assert_eq!(closed.comment.as_deref(), Some("off topic"));
        assert!(
            open_for_history(conn, &history.id, &svc.thresholds())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn missing_decision_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_decision("dec-none").await.unwrap_err();
        assert!(matches!(
            err,
            LabelError::NotFound {
                entity: EntityKind::Decision,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn list_needs_a_history() {
        let svc = test_service().await;
        let err = svc.list_decisions("pub-none").await.unwrap_err();
        assert!(matches!(
            err,
            LabelError::NotFound {
                entity: EntityKind::History,
                ..
            }
        ));
    }
}
