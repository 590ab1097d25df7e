//! Shared test utilities for sdg-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{Duration, Utc};
    use sdg_config::SdgConfig;
    use sdg_core::entities::Vote;
    use sdg_core::label::SdgLabel;

    use crate::LabelDb;
    use crate::repos::{decision, history, vote};
    use crate::service::LabelService;

    /// In-memory service with default configuration.
    pub async fn test_service() -> LabelService {
        let db = LabelDb::open_local(":memory:").await.unwrap();
        LabelService::from_db(db, &SdgConfig::default())
    }

    /// In-memory service with custom vote thresholds.
    pub async fn service_with(votes_for_consensus: usize, votes_for_scenario: usize) -> LabelService {
        let mut config = SdgConfig::default();
        config.consensus.votes_needed_for_consensus = votes_for_consensus;
        config.consensus.votes_needed_for_scenario = votes_for_scenario;
        let db = LabelDb::open_local(":memory:").await.unwrap();
        LabelService::from_db(db, &config)
    }

    /// Register a publication and return its id.
    pub async fn seeded_publication(svc: &LabelService) -> String {
        svc.register_publication("Test publication", None)
            .await
            .unwrap()
            .publication
            .id
    }

    pub fn label(value: u8) -> SdgLabel {
        SdgLabel::new(value).unwrap()
    }

    /// Store and attach `(user, label)` votes one minute apart, without
    /// recomputing consensus.
    pub async fn attach_votes(svc: &LabelService, decision_id: &str, votes: &[(&str, u8)]) {
        let conn = svc.db().conn();
        let target = decision::get(conn, decision_id, &svc.thresholds())
            .await
            .unwrap()
            .unwrap();
        let publication_id = history::get(conn, &target.history_id)
            .await
            .unwrap()
            .unwrap()
            .publication_id;
        let start = Utc::now();
        for (minute, (user, value)) in (0i64..).zip(votes) {
            let stored = Vote {
                id: svc.db().generate_id("vot").await.unwrap(),
                user_id: (*user).to_string(),
                publication_id: publication_id.clone(),
                voted_label: label(*value),
                proposed_label: None,
                comment: None,
                voted_at: start + Duration::minutes(minute),
            };
            vote::insert(conn, &stored).await.unwrap();
            vote::attach(conn, decision_id, &stored.id).await.unwrap();
        }
    }
}
