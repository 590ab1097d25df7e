use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::label::SdgLabel;

/// A single user's label for a publication. Never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Vote {
    pub id: String,
    pub user_id: String,
    pub publication_id: String,
    pub voted_label: SdgLabel,
    pub proposed_label: Option<SdgLabel>,
    pub comment: Option<String>,
    pub voted_at: DateTime<Utc>,
}
