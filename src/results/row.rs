use std::collections::HashMap;
use std::sync::Arc;

use crate::types::SqlValue;

/// A row from a query result.
///
/// Column names and the name-to-index map are shared across all rows of a
/// result set, so a row only owns its values.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<Vec<String>>,
    index: Arc<HashMap<String, usize>>,
    values: Vec<SqlValue>,
}

impl Row {
    pub(crate) fn new(
        columns: Arc<Vec<String>>,
        index: Arc<HashMap<String, usize>>,
        values: Vec<SqlValue>,
    ) -> Self {
        Self {
            columns,
            index,
            values,
        }
    }

    /// The column names of this row, in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The values of this row, in column order.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// The index of a column by name, or None if not present.
    #[must_use]
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.index.get(column_name) {
            return Some(idx);
        }
        self.columns.iter().position(|col| col == column_name)
    }

    /// The value at the named column, or None if the column is not present.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&SqlValue> {
        self.column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// The value at the given column index, or None if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }
}
