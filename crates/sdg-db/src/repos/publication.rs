//! Publication repository.

use chrono::{DateTime, Utc};
use libsql::Connection;

use sdg_core::entities::Publication;
use sdg_core::enums::EntityKind;

use crate::error::{DatabaseError, LabelError};
use crate::helpers::parse_datetime;
use crate::service::LabelService;

const SELECT_COLS: &str = "id, title, created_at";

fn row_to_publication(row: &libsql::Row) -> Result<Publication, DatabaseError> {
    Ok(Publication {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

pub(crate) async fn insert(
    conn: &Connection,
    id: &str,
    title: &str,
    now: DateTime<Utc>,
) -> Result<Publication, DatabaseError> {
    conn.execute(
        "INSERT INTO publications (id, title, created_at) VALUES (?1, ?2, ?3)",
        libsql::params![id, title, now.to_rfc3339()],
    )
    .await?;
    Ok(Publication {
        id: id.to_string(),
        title: title.to_string(),
        created_at: now,
    })
}

pub(crate) async fn get(conn: &Connection, id: &str) -> Result<Option<Publication>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM publications WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_publication(&row)?)),
        None => Ok(None),
    }
}

impl LabelService {
    /// Fetch a publication.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if it was never registered.
    pub async fn get_publication(&self, id: &str) -> Result<Publication, LabelError> {
        get(self.db().conn(), id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Publication, id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn missing_publication_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_publication("pub-missing").await.unwrap_err();
        assert!(
            matches!(err, crate::error::LabelError::NotFound { ref id, .. } if id == "pub-missing"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn registered_publication_round_trips() {
        let svc = test_service().await;
        let record = svc.register_publication("Ocean acidity", None).await.unwrap();
        let fetched = svc.get_publication(&record.publication.id).await.unwrap();
        assert_eq!(fetched, record.publication);
    }
}
