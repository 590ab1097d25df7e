//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};
use sdg_core::label::{SDG_COUNT, SdgLabel};

use crate::error::DatabaseError;

/// Summary column for each SDG, indexed by `SdgLabel::sdg_index`.
pub const SDG_COLUMNS: [&str; SDG_COUNT] = [
    "sdg1", "sdg2", "sdg3", "sdg4", "sdg5", "sdg6", "sdg7", "sdg8", "sdg9", "sdg10", "sdg11",
    "sdg12", "sdg13", "sdg14", "sdg15", "sdg16", "sdg17",
];

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all sdg-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a required label column (1-18).
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for `0` or out-of-range values.
pub fn get_label(row: &libsql::Row, idx: i32) -> Result<SdgLabel, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    SdgLabel::from_stored(raw)?
        .ok_or_else(|| DatabaseError::InvalidState(format!("column {idx} holds no label")))
}

/// Read a label column where NULL and `0` both mean "no label".
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for out-of-range values.
pub fn get_opt_label(row: &libsql::Row, idx: i32) -> Result<Option<SdgLabel>, DatabaseError> {
    match row.get::<Option<i64>>(idx)? {
        Some(raw) => Ok(SdgLabel::from_stored(raw)?),
        None => Ok(None),
    }
}

/// Optional label as a bindable SQL value (NULL when absent).
#[must_use]
pub fn opt_label_value(label: Option<SdgLabel>) -> libsql::Value {
    label.map_or(libsql::Value::Null, |l| {
        libsql::Value::Integer(i64::from(l.value()))
    })
}
