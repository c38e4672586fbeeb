use std::collections::HashMap;
use std::sync::Arc;

use super::row::Row;
use crate::types::SqlValue;

/// An ordered collection of rows returned by one query.
///
/// Column metadata is built once per result set and shared by every row.
#[derive(Debug, Clone)]
pub struct ResultSet {
    columns: Arc<Vec<String>>,
    index: Arc<HashMap<String, usize>>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create an empty result set for the given columns.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self::with_capacity(columns, 0)
    }

    /// Create an empty result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(columns: Vec<String>, capacity: usize) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect::<HashMap<_, _>>();
        Self {
            columns: Arc::new(columns),
            index: Arc::new(index),
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Append a row of values, in column order.
    pub fn push_row(&mut self, values: Vec<SqlValue>) {
        self.rows.push(Row::new(
            Arc::clone(&self.columns),
            Arc::clone(&self.index),
            values,
        ));
    }

    /// The column names, in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows of this result set, in result order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
