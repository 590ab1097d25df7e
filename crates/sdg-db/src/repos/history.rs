//! History repository: one history per publication, with the flag that
//! decides whether the next vote joins the open decision or starts a new one.

use chrono::{DateTime, Utc};
use libsql::Connection;
use tracing::info;

use sdg_core::entities::History;
use sdg_core::enums::EntityKind;

use crate::error::{DatabaseError, LabelError};
use crate::helpers::parse_datetime;
use crate::repos::decision;
use crate::service::{LabelService, finish};

const SELECT_COLS: &str = "id, publication_id, active, created_at";

fn row_to_history(row: &libsql::Row) -> Result<History, DatabaseError> {
    Ok(History {
        id: row.get(0)?,
        publication_id: row.get(1)?,
        active: row.get::<i64>(2)? != 0,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

pub(crate) async fn insert(
    conn: &Connection,
    id: &str,
    publication_id: &str,
    now: DateTime<Utc>,
) -> Result<History, DatabaseError> {
    conn.execute(
        "INSERT INTO histories (id, publication_id, active, created_at) VALUES (?1, ?2, 1, ?3)",
        libsql::params![id, publication_id, now.to_rfc3339()],
    )
    .await?;
    Ok(History {
        id: id.to_string(),
        publication_id: publication_id.to_string(),
        active: true,
        created_at: now,
    })
}

pub(crate) async fn get(conn: &Connection, id: &str) -> Result<Option<History>, DatabaseError> {
    query_one(conn, "id", id).await
}

pub(crate) async fn get_for_publication(
    conn: &Connection,
    publication_id: &str,
) -> Result<Option<History>, DatabaseError> {
    query_one(conn, "publication_id", publication_id).await
}

/// Set the `active` flag. Returns the number of rows changed.
pub(crate) async fn set_active(
    conn: &Connection,
    history_id: &str,
    active: bool,
) -> Result<u64, DatabaseError> {
    Ok(conn
        .execute(
            "UPDATE histories SET active = ?1 WHERE id = ?2",
            libsql::params![i64::from(active), history_id],
        )
        .await?)
}

async fn query_one(
    conn: &Connection,
    column: &str,
    value: &str,
) -> Result<Option<History>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM histories WHERE {column} = ?1"),
            [value],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_history(&row)?)),
        None => Ok(None),
    }
}

impl LabelService {
    /// The decision history of a publication.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the publication has no history.
    pub async fn get_history(&self, publication_id: &str) -> Result<History, LabelError> {
        get_for_publication(self.db().conn(), publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::History, publication_id))
    }

    /// Set whether the next vote on a publication joins its most recent open
    /// decision (`true`) or opens a new one (`false`).
    ///
    /// Finalization clears the flag and the vote that opens the next decision
    /// sets it again. An inactive history never has an open decision.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the publication has no history, and
    /// `LabelError::Validation` when deactivating while a decision is open.
    pub async fn set_history_active(
        &self,
        publication_id: &str,
        active: bool,
    ) -> Result<History, LabelError> {
        self.write("set_history_active", move || {
            self.set_history_active_once(publication_id, active)
        })
        .await
    }

    async fn set_history_active_once(
        &self,
        publication_id: &str,
        active: bool,
    ) -> Result<History, LabelError> {
        let tx = self.begin().await?;
        let result = self.set_history_active_in(&tx, publication_id, active).await;
        finish(tx, result).await
    }

    async fn set_history_active_in(
        &self,
        conn: &Connection,
        publication_id: &str,
        active: bool,
    ) -> Result<History, LabelError> {
        let mut history = get_for_publication(conn, publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::History, publication_id))?;

        if !active
            && let Some(open) = decision::open_for_history(conn, &history.id, &self.thresholds()).await?
        {
            return Err(LabelError::Validation(format!(
                "decision {} of publication {publication_id} is still open",
                open.id
            )));
        }

        set_active(conn, &history.id, active).await?;
        history.active = active;
        info!(publication_id, active, "History flag set");
        Ok(history)
    }
}
