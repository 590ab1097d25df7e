//! Vote repository. Votes are append-only; the `decision_votes` table keeps
//! the attach order of each decision.

use libsql::Connection;

use sdg_core::entities::Vote;

use crate::error::{DatabaseError, LabelError};
use crate::helpers::{get_label, get_opt_label, get_opt_string, opt_label_value, parse_datetime};
use crate::service::LabelService;

const SELECT_COLS: &str =
    "v.id, v.user_id, v.publication_id, v.voted_label, v.proposed_label, v.comment, v.voted_at";

fn row_to_vote(row: &libsql::Row) -> Result<Vote, DatabaseError> {
    Ok(Vote {
        id: row.get(0)?,
        user_id: row.get(1)?,
        publication_id: row.get(2)?,
        voted_label: get_label(row, 3)?,
        proposed_label: get_opt_label(row, 4)?,
        comment: get_opt_string(row, 5)?,
        voted_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

pub(crate) async fn insert(conn: &Connection, vote: &Vote) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO votes (id, user_id, publication_id, voted_label, proposed_label, comment, voted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            vote.id.as_str(),
            vote.user_id.as_str(),
            vote.publication_id.as_str(),
            i64::from(vote.voted_label.value()),
            opt_label_value(vote.proposed_label),
            vote.comment.as_deref(),
            vote.voted_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

/// Attach a vote to a decision. Attaching the same vote twice is a no-op.
pub(crate) async fn attach(
    conn: &Connection,
    decision_id: &str,
    vote_id: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO decision_votes (decision_id, vote_id) VALUES (?1, ?2)",
        [decision_id, vote_id],
    )
    .await?;
    Ok(())
}

/// Every vote attached to a decision, in attach order.
pub(crate) async fn for_decision(
    conn: &Connection,
    decision_id: &str,
) -> Result<Vec<Vote>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM votes v
                 JOIN decision_votes dv ON dv.vote_id = v.id
                 WHERE dv.decision_id = ?1
                 ORDER BY dv.seq"
            ),
            [decision_id],
        )
        .await?;
    let mut votes = Vec::new();
    while let Some(row) = rows.next().await? {
        votes.push(row_to_vote(&row)?);
    }
    Ok(votes)
}

impl LabelService {
    /// Every vote attached to a decision, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if the query fails.
    pub async fn list_votes(&self, decision_id: &str) -> Result<Vec<Vote>, LabelError> {
        Ok(for_decision(self.db().conn(), decision_id).await?)
    }

    /// Every vote a user has cast, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if the query fails.
    pub async fn votes_by_user(&self, user_id: &str) -> Result<Vec<Vote>, LabelError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM votes v WHERE v.user_id = ?1
                     ORDER BY v.voted_at, v.rowid"
                ),
                [user_id],
            )
            .await?;
        let mut votes = Vec::new();
        while let Some(row) = rows.next().await? {
            votes.push(row_to_vote(&row)?);
        }
        Ok(votes)
    }
}
