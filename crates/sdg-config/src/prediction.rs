//! Upstream prediction source.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "aurora".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PredictionConfig {
    /// Model whose highest-confidence SDG seeds a new decision's suggested label.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}
