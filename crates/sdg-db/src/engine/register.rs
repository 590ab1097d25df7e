//! Seeding a publication with the records vote submission relies on.

use chrono::Utc;
use libsql::Connection;
use serde::Serialize;
use tracing::info;

use sdg_core::entities::{History, Publication, Summary};
use sdg_core::ids::{PREFIX_HISTORY, PREFIX_PUBLICATION, PREFIX_SUMMARY};

use crate::error::LabelError;
use crate::generate_id;
use crate::repos::{history, publication, summary};
use crate::service::{LabelService, finish};

/// A freshly registered publication with its active history and an
/// all-undecided summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationRecord {
    pub publication: Publication,
    pub history: History,
    pub summary: Summary,
}

impl LabelService {
    /// Register a publication. A random `pub-` id is generated unless one is
    /// supplied.
    ///
    /// # Errors
    ///
    /// `LabelError::Validation` for a blank title or an id that is already
    /// registered.
    pub async fn register_publication(
        &self,
        title: &str,
        id: Option<&str>,
    ) -> Result<PublicationRecord, LabelError> {
        if title.trim().is_empty() {
            return Err(LabelError::Validation("title must not be empty".into()));
        }
        if id.is_some_and(|id| id.trim().is_empty()) {
            return Err(LabelError::Validation("publication id must not be blank".into()));
        }
        self.write("register_publication", move || {
            self.register_publication_once(title, id)
        })
        .await
    }

    async fn register_publication_once(
        &self,
        title: &str,
        id: Option<&str>,
    ) -> Result<PublicationRecord, LabelError> {
        let tx = self.begin().await?;
        let result = Self::register_in(&tx, title, id).await;
        finish(tx, result).await
    }

    async fn register_in(
        conn: &Connection,
        title: &str,
        id: Option<&str>,
    ) -> Result<PublicationRecord, LabelError> {
        let publication_id = match id {
            Some(id) => {
                if publication::get(conn, id).await?.is_some() {
                    return Err(LabelError::Validation(format!(
                        "publication {id} is already registered"
                    )));
                }
                id.to_string()
            }
            None => generate_id(conn, PREFIX_PUBLICATION).await?,
        };

        let now = Utc::now();
        let publication = publication::insert(conn, &publication_id, title, now).await?;
        let history_id = generate_id(conn, PREFIX_HISTORY).await?;
        let history = history::insert(conn, &history_id, &publication_id, now).await?;
        let summary = Summary::undecided(
            generate_id(conn, PREFIX_SUMMARY).await?,
            &publication_id,
            &history_id,
        );
        summary::insert(conn, &summary).await?;

        info!(publication_id = %publication.id, "Publication registered");
        Ok(PublicationRecord {
            publication,
            history,
            summary,
        })
    }
}
