//! ID prefixes for generated entity identifiers.
//!
//! IDs have the form `{prefix}-{8 hex chars}`, e.g. `dec-a3f8b2c1`.

pub const PREFIX_PUBLICATION: &str = "pub";
pub const PREFIX_HISTORY: &str = "his";
pub const PREFIX_SUMMARY: &str = "sum";
pub const PREFIX_DECISION: &str = "dec";
pub const PREFIX_VOTE: &str = "vot";
pub const PREFIX_PREDICTION: &str = "prd";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PUBLICATION,
    PREFIX_HISTORY,
    PREFIX_SUMMARY,
    PREFIX_DECISION,
    PREFIX_VOTE,
    PREFIX_PREDICTION,
];

/// Format an ID from a prefix and its random part.
#[must_use]
pub fn format_id(prefix: &str, random: &str) -> String {
    format!("{prefix}-{random}")
}

/// Return the prefix of an ID, if it has one.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}
