use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SummaryMark;
use crate::label::{SDG_COUNT, SdgLabel};

/// Per-SDG relevance projection for one publication.
///
/// `marks[0]` is SDG 1, `marks[16]` is SDG 17. The marks are only ever
/// written through [`Summary::apply`], which projects a finalized decision.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Summary {
    pub id: String,
    pub publication_id: String,
    pub history_id: String,
    pub marks: [SummaryMark; SDG_COUNT],
}

impl Summary {
    /// A fresh summary with every SDG undecided.
    #[must_use]
    pub fn undecided(
        id: impl Into<String>,
        publication_id: impl Into<String>,
        history_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            publication_id: publication_id.into(),
            history_id: history_id.into(),
            marks: [SummaryMark::Undecided; SDG_COUNT],
        }
    }

    /// Mark for SDG `sdg` (1-based). `None` for the null class.
    #[must_use]
    pub fn mark(&self, sdg: SdgLabel) -> Option<SummaryMark> {
        sdg.sdg_index().map(|idx| self.marks[idx])
    }

    /// Project a finalized label.
    ///
    /// The null class excludes every SDG. Any other label confirms exactly its
    /// own SDG and leaves the rest untouched, so confirmations from earlier
    /// decisions accumulate.
    pub fn apply(&mut self, label: SdgLabel) {
        match label.sdg_index() {
            Some(idx) => self.marks[idx] = SummaryMark::Confirmed,
            None => self.marks = [SummaryMark::Excluded; SDG_COUNT],
        }
    }

    /// SDG numbers currently confirmed relevant.
    #[must_use]
    pub fn confirmed_sdgs(&self) -> Vec<u8> {
        (1..=17u8)
            .zip(self.marks.iter())
            .filter(|(_, mark)| **mark == SummaryMark::Confirmed)
            .map(|(sdg, _)| sdg)
            .collect()
    }
}
