//! SQL helpers shared by the tracker repositories.

use crate::model::timestamp::{format_timestamp, parse_timestamp, Timestamp};
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Accumulates `column = ?` assignments for a single-row `UPDATE`.
#[derive(Debug, Default)]
pub(crate) struct ColumnUpdates {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl ColumnUpdates {
    pub(crate) fn set(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.values.push(value);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Runs `UPDATE {table} SET ... WHERE id = ?` and returns rows changed.
    ///
    /// `table` and column names come from compile-time constants only.
    pub(crate) fn execute(
        self,
        conn: &Connection,
        table: &'static str,
        id: RecordId,
    ) -> RepoResult<usize> {
        let assignments = self
            .columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {table} SET {assignments} WHERE id = ?;");

        let mut values = self.values;
        values.push(Value::Integer(id));
        Ok(conn.execute(&sql, params_from_iter(values))?)
    }
}

pub(crate) fn text_value(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn optional_id_value(value: Option<RecordId>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

pub(crate) fn optional_timestamp_value(value: Option<&Timestamp>) -> Value {
    value.map_or(Value::Null, |ts| Value::Text(format_timestamp(ts)))
}

pub(crate) fn timestamp_to_db(value: Option<&Timestamp>) -> Option<String> {
    value.map(format_timestamp)
}

/// Decodes a stored ISO-8601 column, keeping SQL `NULL` as `None`.
pub(crate) fn parse_stored_timestamp(
    column: &str,
    value: Option<String>,
) -> RepoResult<Option<Timestamp>> {
    match value {
        Some(text) => parse_timestamp("stored_timestamp", &text)
            .map(Some)
            .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{text}` in {column}"))),
        None => Ok(None),
    }
}

/// Escapes LIKE metacharacters and wraps the value as a substring pattern.
///
/// Pair with `ESCAPE '\'` in SQL.
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
