use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::label::SdgLabel;

/// Upstream model score for one SDG of a publication.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Prediction {
    pub id: String,
    pub publication_id: String,
    pub model: String,
    pub sdg: SdgLabel,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}
