//! Prediction repository: upstream model scores per SDG.

use chrono::Utc;
use libsql::Connection;

use sdg_core::entities::Prediction;
use sdg_core::enums::EntityKind;
use sdg_core::ids::PREFIX_PREDICTION;
use sdg_core::label::SdgLabel;

use crate::error::{DatabaseError, LabelError};
use crate::helpers::{get_label, parse_datetime};
use crate::service::LabelService;

const SELECT_COLS: &str = "id, publication_id, model, sdg, score, created_at";

fn row_to_prediction(row: &libsql::Row) -> Result<Prediction, DatabaseError> {
    Ok(Prediction {
        id: row.get(0)?,
        publication_id: row.get(1)?,
        model: row.get(2)?,
        sdg: get_label(row, 3)?,
        score: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Highest-scoring SDG of `model` for a publication. Ties go to the lowest SDG.
pub(crate) async fn highest_confidence(
    conn: &Connection,
    publication_id: &str,
    model: &str,
) -> Result<Option<(SdgLabel, f64)>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT sdg, score FROM predictions
             WHERE publication_id = ?1 AND model = ?2
             ORDER BY score DESC, sdg ASC
             LIMIT 1",
            [publication_id, model],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some((get_label(&row, 0)?, row.get::<f64>(1)?))),
        None => Ok(None),
    }
}

impl LabelService {
    /// Store one upstream model score.
    ///
    /// # Errors
    ///
    /// `LabelError::Validation` for the null class or a non-finite score,
    /// `LabelError::NotFound` if the publication does not exist.
    pub async fn record_prediction(
        &self,
        publication_id: &str,
        model: &str,
        sdg: SdgLabel,
        score: f64,
    ) -> Result<Prediction, LabelError> {
        if sdg.is_not_relevant() {
            return Err(LabelError::Validation(
                "predictions only cover SDGs 1-17".into(),
            ));
        }
        if !score.is_finite() {
            return Err(LabelError::Validation(format!(
                "prediction score must be finite, got {score}"
            )));
        }
        if model.trim().is_empty() {
            return Err(LabelError::Validation("model must not be empty".into()));
        }

        self.write("record_prediction", move || {
            self.record_prediction_once(publication_id, model, sdg, score)
        })
        .await
    }

    async fn record_prediction_once(
        &self,
        publication_id: &str,
        model: &str,
        sdg: SdgLabel,
        score: f64,
    ) -> Result<Prediction, LabelError> {
        let conn = self.db().conn();
        if super::publication::get(conn, publication_id).await?.is_none() {
            return Err(LabelError::not_found(EntityKind::Publication, publication_id));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PREDICTION).await?;
        conn.execute(
            "INSERT INTO predictions (id, publication_id, model, sdg, score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                id.as_str(),
                publication_id,
                model,
                i64::from(sdg.value()),
                score,
                now.to_rfc3339()
            ],
        )
        .await?;

        Ok(Prediction {
            id,
            publication_id: publication_id.to_string(),
            model: model.to_string(),
            sdg,
            score,
            created_at: now,
        })
    }

    /// The SDG the upstream `model` is most confident about, with its score.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if the query fails.
    pub async fn highest_confidence_sdg(
        &self,
        publication_id: &str,
        model: &str,
    ) -> Result<Option<(SdgLabel, f64)>, LabelError> {
        Ok(highest_confidence(self.db().conn(), publication_id, model).await?)
    }

    /// All predictions for a publication, highest score first.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::Persistence` if the query fails.
    pub async fn list_predictions(
        &self,
        publication_id: &str,
    ) -> Result<Vec<Prediction>, LabelError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM predictions WHERE publication_id = ?1
                     ORDER BY score DESC, sdg ASC"
                ),
                [publication_id],
            )
            .await?;
        let mut predictions = Vec::new();
        while let Some(row) = rows.next().await? {
            predictions.push(row_to_prediction(&row)?);
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sdg_core::label::SdgLabel;

    use crate::error::LabelError;
    use crate::test_support::helpers::{label, seeded_publication, test_service};

    #[tokio::test]
    async fn highest_score_wins() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        svc.record_prediction(&pub_id, "aurora", label(4), 0.2).await.unwrap();
        svc.record_prediction(&pub_id, "aurora", label(13), 0.7).await.unwrap();
        svc.record_prediction(&pub_id, "other", label(2), 0.99).await.unwrap();

        let best = svc.highest_confidence_sdg(&pub_id, "aurora").await.unwrap();
        assert_eq!(best, Some((label(13), 0.7)));
    }

    #[tokio::test]
    async fn ties_go_to_lowest_sdg() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        svc.record_prediction(&pub_id, "aurora", label(11), 0.5).await.unwrap();
        svc.record_prediction(&pub_id, "aurora", label(6), 0.5).await.unwrap();

        let best = svc.highest_confidence_sdg(&pub_id, "aurora").await.unwrap();
        assert_eq!(best, Some((label(6), 0.5)));
    }

    #[tokio::test]
    async fn unknown_model_has_no_prediction() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        assert_eq!(svc.highest_confidence_sdg(&pub_id, "aurora").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_null_class_and_missing_publication() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        let err = svc
            .record_prediction(&pub_id, "aurora", SdgLabel::NOT_RELEVANT, 0.1)
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));

        let err = svc
            .record_prediction("pub-nope", "aurora", label(1), 0.1)
            .await
            .unwrap_err();
        assert!(matches!(err, LabelError::NotFound { .. }));
    }

    #[tokio::test]
    async fn lists_by_score() {
        let svc = test_service().await;
        let pub_id = seeded_publication(&svc).await;
        svc.record_prediction(&pub_id, "aurora", label(1), 0.1).await.unwrap();
        svc.record_prediction(&pub_id, "aurora", label(2), 0.9).await.unwrap();

        let sdgs: Vec<_> = svc
            .list_predictions(&pub_id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.sdg)
            .collect();
        assert_eq!(sdgs, vec![label(2), label(1)]);
    }
}
