//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and accept both timestamp
//! formats found in the database: RFC 3339 written by the repos and the
//! `strftime` defaults written by the schema.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use pdh_core::enums::ItemType;

use crate::error::DatabaseError;

/// Current time at the microsecond precision kept in TEXT columns.
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage. The fixed width keeps TEXT ordering chronological.
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000Z"`) and the plain
/// `"2026-02-09 14:30:00"` form.
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

/// Parse a nullable `YYYY-MM-DD` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a calendar date.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}"))),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with every pdh-core enum, whatever its `rename_all` casing.
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
/// Use `get::<Option<String>>()` for nullable columns.
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

/// Table and columns backing one linkable item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSource {
    pub table: &'static str,
    pub content_column: &'static str,
    pub name_column: Option<&'static str>,
    /// Not-found label shown to API clients.
    pub label: &'static str,
}

/// Map an [`ItemType`] to the table holding it.
///
/// Uses exhaustive match. Adding an `ItemType` variant forces updating this.
#[must_use]
pub const fn item_source(item_type: ItemType) -> ItemSource {
    match item_type {
        ItemType::CsdItem => ItemSource {
            table: "csd_items",
            content_column: "text",
            name_column: None,
            label: "CSD item",
        },
        ItemType::RoadmapItem => ItemSource {
            table: "roadmap_items",
            content_column: "description",
            name_column: Some("name"),
            label: "Roadmap item",
        },
        ItemType::PersonaDetail => ItemSource {
            table: "persona_details",
            content_column: "content",
            name_column: None,
            label: "Persona detail",
        },
        ItemType::OkrKeyResult => ItemSource {
            table: "key_results",
            content_column: "description",
            name_column: Some("title"),
            label: "Key result",
        },
        ItemType::Objective => ItemSource {
            table: "objectives",
            content_column: "description",
            name_column: Some("title"),
            label: "Objective",
        },
        ItemType::RiceItem => ItemSource {
            table: "rice_items",
            content_column: "description",
            name_column: Some("name"),
            label: "RICE item",
        },
    }
}

/// Owner-scoped lookup returning `(id, content, name, project_id)` for one item.
///
/// Binds `?1` = item id and `?2` = user id. Key results and persona details
/// carry no `project_id` of their own, so their parent row supplies it.
#[must_use]
pub fn item_lookup_sql(item_type: ItemType) -> String {
    let source = item_source(item_type);
    let name = source
        .name_column
        .map_or_else(|| "NULL".to_string(), |col| format!("t.{col}"));
    let content = format!("COALESCE(t.{}, '')", source.content_column);
    match item_type {
        ItemType::OkrKeyResult => format!(
            "SELECT t.id, {content}, {name}, o.project_id
             FROM key_results t JOIN objectives o ON o.id = t.objective_id
             WHERE t.id = ?1 AND o.user_id = ?2"
        ),
        ItemType::PersonaDetail => format!(
            "SELECT t.id, {content}, {name}, p.project_id
             FROM persona_details t JOIN personas p ON p.id = t.persona_id
             WHERE t.id = ?1 AND t.user_id = ?2"
        ),
        _ => format!(
            "SELECT t.id, {content}, {name}, t.project_id
             FROM {} t WHERE t.id = ?1 AND t.user_id = ?2",
            source.table
        ),
    }
}
