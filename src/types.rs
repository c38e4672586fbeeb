use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::ScopeError;

/// Values that can be bound as statement parameters or read back from a
/// result row.
///
/// One representation is shared on both sides of the connection trait so
/// callers never touch driver types:
/// ```rust
/// use sql_scope::prelude::*;
///
/// let params = vec![
///     SqlValue::Int(1),
///     SqlValue::Text("alice".into()),
///     SqlValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    Json(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let SqlValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let SqlValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let SqlValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Boolean view; integer 0/1 is accepted since engines without a native
    /// boolean type store booleans that way.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(value) => Some(*value),
            SqlValue::Int(0) => Some(false),
            SqlValue::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Timestamp view; text values are parsed with and without fractional
    /// seconds since engines commonly return timestamps as text.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let SqlValue::Timestamp(value) = self {
            return Some(*value);
        }
        if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let SqlValue::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let SqlValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// The conversion "mode".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionMode {
    /// When the converted parameters will be used in a query (SELECT)
    Query,
    /// When the converted parameters will be used for statement execution (INSERT/UPDATE/etc.)
    Execute,
}

/// Convert a slice of `SqlValue` into backend-specific parameters.
///
/// Backends implement this so generic code can convert parameters without
/// branching on driver types.
pub trait ParamConverter<'a> {
    type Converted;

    /// Convert a slice of `SqlValue` into the backend's parameter type.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ParameterError` if any value cannot be
    /// represented by the backend.
    fn convert_params(
        params: &'a [SqlValue],
        mode: ConversionMode,
    ) -> Result<Self::Converted, ScopeError>;

    /// Check if this converter supports the given mode
    #[must_use]
    fn supports_mode(_mode: ConversionMode) -> bool {
        true // By default, support both modes
    }
}
