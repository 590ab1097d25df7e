use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A harvested publication. Only the fields the engine needs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
