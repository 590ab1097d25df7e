//! Summary repository. The 17 SDG marks live in columns `sdg1..sdg17`,
//! addressed through [`SDG_COLUMNS`].

use libsql::Connection;

use sdg_core::entities::Summary;
use sdg_core::enums::{EntityKind, SummaryMark};
use sdg_core::label::SDG_COUNT;

use crate::error::{DatabaseError, LabelError};
use crate::helpers::SDG_COLUMNS;
use crate::service::LabelService;

/// Marks start at column 3, after `id, publication_id, history_id`.
const FIRST_MARK_COLUMN: i32 = 3;

fn select_cols() -> String {
    format!("id, publication_id, history_id, {}", SDG_COLUMNS.join(", "))
}

fn row_to_summary(row: &libsql::Row) -> Result<Summary, DatabaseError> {
    let mut marks = [SummaryMark::Undecided; SDG_COUNT];
    for (offset, mark) in (0i32..).zip(marks.iter_mut()) {
        *mark = SummaryMark::from_i64(row.get::<i64>(FIRST_MARK_COLUMN + offset)?)?;
    }
    Ok(Summary {
        id: row.get(0)?,
        publication_id: row.get(1)?,
        history_id: row.get(2)?,
        marks,
    })
}

pub(crate) async fn insert(conn: &Connection, summary: &Summary) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO summaries (id, publication_id, history_id) VALUES (?1, ?2, ?3)",
        libsql::params![
            summary.id.as_str(),
            summary.publication_id.as_str(),
            summary.history_id.as_str()
        ],
    )
    .await?;
    save_marks(conn, summary).await
}

/// Overwrite all 17 marks of a stored summary.
pub(crate) async fn save_marks(conn: &Connection, summary: &Summary) -> Result<(), DatabaseError> {
    let sets: Vec<String> = SDG_COLUMNS
        .iter()
        .enumerate()
        .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
        .collect();
    let mut params: Vec<libsql::Value> = summary
        .marks
        .iter()
        .map(|mark| libsql::Value::Integer(mark.as_i64()))
        .collect();
    params.push(summary.id.clone().into());

    let sql = format!(
        "UPDATE summaries SET {} WHERE id = ?{}",
        sets.join(", "),
        SDG_COUNT + 1
    );
    let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

pub(crate) async fn get_for_publication(
    conn: &Connection,
    publication_id: &str,
) -> Result<Option<Summary>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {} FROM summaries WHERE publication_id = ?1",
                select_cols()
            ),
            [publication_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_summary(&row)?)),
        None => Ok(None),
    }
}

impl LabelService {
    /// Current per-SDG marks of a publication.
    ///
    /// # Errors
    ///
    /// `LabelError::NotFound` if the publication has no summary.
    pub async fn get_summary(&self, publication_id: &str) -> Result<Summary, LabelError> {
        get_for_publication(self.db().conn(), publication_id)
            .await?
            .ok_or_else(|| LabelError::not_found(EntityKind::Summary, publication_id))
    }
}
