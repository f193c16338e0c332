//! Partial-update types for entity mutations.
//!
//! Each update struct has `Option` fields. Only `Some` fields generate SET
//! clauses in the dynamic UPDATE SQL. Nullable columns use `Option<Option<T>>`
//! so a client can clear a value with an explicit `null`.

pub mod canvas;
pub mod csd;
pub mod okr;
pub mod persona;
pub mod project;
pub mod rice;
pub mod roadmap;

use serde::{Deserialize, Deserializer};

use crate::helpers::{format_timestamp, now_utc};

/// Deserialize a present field (including `null`) as `Some(..)`.
///
/// Combined with `#[serde(default)]`, a missing field stays `None` while
/// `"field": null` becomes `Some(None)`.
pub(crate) fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Accumulates `column = ?n` clauses and their positional parameters.
#[derive(Debug, Default)]
pub(crate) struct SetList {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl SetList {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish as `UPDATE {table} SET .., updated_at = ? WHERE id = ? [AND user_id = ?]`.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        id: &str,
        user_id: Option<&str>,
    ) -> (String, Vec<libsql::Value>) {
        self.push("updated_at", format_timestamp(now_utc()));
        self.params.push(id.into());
        let mut sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        if let Some(user_id) = user_id {
            self.params.push(user_id.into());
            sql.push_str(&format!(" AND user_id = ?{}", self.params.len()));
        }
        (sql, self.params)
    }
}

/// One `UPDATE` that writes each id's index in `ids` to `order_column`,
/// optionally moving every row to `category`. Rows owned by another user
/// are left untouched.
pub(crate) fn reorder_statement(
    table: &str,
    order_column: &str,
    category: Option<&str>,
    ids: &[String],
    user_id: &str,
) -> (String, Vec<libsql::Value>) {
    let mut params: Vec<libsql::Value> = ids.iter().map(|id| id.as_str().into()).collect();
    let whens: Vec<String> = (1..=ids.len())
        .map(|n| format!("WHEN ?{n} THEN {}", n - 1))
        .collect();
    let placeholders: Vec<String> = (1..=ids.len()).map(|n| format!("?{n}")).collect();

    let mut sets = vec![format!("{order_column} = CASE id {} END", whens.join(" "))];
    if let Some(category) = category {
        params.push(category.into());
        sets.push(format!("category = ?{}", params.len()));
    }
    params.push(format_timestamp(now_utc()).into());
    sets.push(format!("updated_at = ?{}", params.len()));
    params.push(user_id.into());
    let sql = format!(
        "UPDATE {table} SET {} WHERE user_id = ?{} AND id IN ({})",
        sets.join(", "),
        params.len(),
        placeholders.join(", ")
    );
    (sql, params)
}
