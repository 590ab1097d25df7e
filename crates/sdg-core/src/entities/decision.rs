use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{DecisionType, Scenario};
use crate::label::SdgLabel;

/// One round of consensus for a publication.
///
/// `decided_label == None` means the decision is still open. `scenario` is
/// derived from the attached votes whenever the decision is read and is not
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Decision {
    pub id: String,
    pub history_id: String,
    pub suggested_label: Option<SdgLabel>,
    pub decided_label: Option<SdgLabel>,
    pub decision_type: DecisionType,
    pub scenario: Scenario,
    pub expert_id: Option<String>,
    pub comment: Option<String>,
    pub decided_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Decision {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.decided_label.is_none()
    }
}
