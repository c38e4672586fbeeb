use rusqlite::types::Value;
use rusqlite::{Statement, ToSql};

use crate::error::ScopeError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// Extract a `SqlValue` from a `SQLite` row.
///
/// # Errors
///
/// Returns `ScopeError` if the value cannot be read.
pub fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<SqlValue, ScopeError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Int(i),
        Value::Real(f) => SqlValue::Float(f),
        Value::Text(s) => SqlValue::Text(s),
        Value::Blob(b) => SqlValue::Blob(b),
    })
}

/// Run a prepared statement and build a result set from its rows, in
/// result order.
///
/// # Errors
///
/// Returns `ScopeError` if query execution or value extraction fails.
pub fn build_result_set(stmt: &mut Statement, params: &[Value]) -> Result<ResultSet, ScopeError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = columns.len();

    let mut result_set = ResultSet::new(columns);
    let mut rows = stmt.query(&param_refs[..])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(extract_value(row, idx)?);
        }
        result_set.push_row(values);
    }
    Ok(result_set)
}
