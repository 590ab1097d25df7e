use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Append-only sequence of decisions for one publication.
///
/// While `active` is false the publication accepts no new votes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct History {
    pub id: String,
    pub publication_id: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
