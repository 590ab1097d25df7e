//! The SDG label a vote or decision refers to.
//!
//! Labels `1..=17` name one of the UN Sustainable Development Goals. Label
//! `18` is the null class: the publication is relevant to no SDG at all.
//! "Still open" is not a label; it is modelled as `Option<SdgLabel>::None`
//! and stored as `0`.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Number of SDGs tracked per publication.
pub const SDG_COUNT: usize = 17;

/// A validated SDG label in `1..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SdgLabel(u8);

impl SdgLabel {
    /// The null class: relevant to no SDG.
    pub const NOT_RELEVANT: Self = Self(18);

    /// Create a label, rejecting anything outside `1..=18`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for `0` and values above `18`.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (1..=18).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::Validation(format!(
                "SDG label must be between 1 and 18, got {value}"
            )))
        }
    }

    /// Decode the storage form, where `0` means "no label yet".
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for negative values and values above `18`.
    pub fn from_stored(value: i64) -> Result<Option<Self>, CoreError> {
        if value == 0 {
            return Ok(None);
        }
        let narrowed = u8::try_from(value).map_err(|_| {
            CoreError::Validation(format!("stored SDG label out of range: {value}"))
        })?;
        Self::new(narrowed).map(Some)
    }

    /// Encode an optional label for storage (`None` becomes `0`).
    #[must_use]
    pub fn to_stored(label: Option<Self>) -> i64 {
        label.map_or(0, |l| i64::from(l.0))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_not_relevant(self) -> bool {
        self.0 == Self::NOT_RELEVANT.0
    }

    /// Zero-based index into a publication's 17 summary marks.
    ///
    /// `None` for the null class, which touches every mark instead of one.
    #[must_use]
    pub const fn sdg_index(self) -> Option<usize> {
        if self.is_not_relevant() {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }
}

impl TryFrom<u8> for SdgLabel {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SdgLabel> for u8 {
    fn from(label: SdgLabel) -> Self {
        label.0
    }
}

impl fmt::Display for SdgLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_not_relevant() {
            f.write_str("none")
        } else {
            write!(f, "sdg{}", self.0)
        }
    }
}

impl JsonSchema for SdgLabel {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        "SdgLabel".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "minimum": 1,
            "maximum": 18
        })
    }
}
