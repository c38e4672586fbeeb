use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::error::ScopeError;
use crate::types::{ConversionMode, ParamConverter, SqlValue};

/// Convert a single `SqlValue` to a rusqlite `Value`.
///
/// Booleans become 0/1 integers and timestamps become text, matching how
/// `SQLite` stores those types.
#[must_use]
pub fn sql_value_to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Int(i) => Value::Integer(*i),
        SqlValue::Float(f) => Value::Real(*f),
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Bool(b) => Value::Integer(i64::from(*b)),
        SqlValue::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        SqlValue::Null => Value::Null,
        SqlValue::Json(jval) => Value::Text(jval.to_string()),
        SqlValue::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Unified `SQLite` parameter container.
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert scope values into `SQLite` values.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ParameterError` if conversion fails; every
    /// `SqlValue` currently has a `SQLite` representation.
    pub fn convert(params: &[SqlValue]) -> Result<Self, ScopeError> {
        Ok(Params(params.iter().map(sql_value_to_sqlite).collect()))
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn ToSql> {
        self.0.iter().map(|v| v as &dyn ToSql).collect()
    }
}

impl ParamConverter<'_> for Params {
    type Converted = Params;

    fn convert_params(
        params: &[SqlValue],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, ScopeError> {
        Self::convert(params)
    }

    fn supports_mode(mode: ConversionMode) -> bool {
        // Single Params type supports both query and execute.
        matches!(mode, ConversionMode::Query | ConversionMode::Execute)
    }
}
