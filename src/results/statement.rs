/// The outcome of one executed statement.
///
/// A query produces mapped rows; an update produces the engine-reported
/// affected-row count. Owned by the caller once returned.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult<T = ()> {
    /// Mapped rows from a query, in result-set order.
    Rows(Vec<T>),
    /// Affected-row count from an update.
    Affected(u64),
}

impl<T> StatementResult<T> {
    /// The mapped rows, if this is a query result.
    #[must_use]
    pub fn as_rows(&self) -> Option<&[T]> {
        if let StatementResult::Rows(rows) = self {
            Some(rows)
        } else {
            None
        }
    }

    /// Consume into the mapped rows, if this is a query result.
    #[must_use]
    pub fn into_rows(self) -> Option<Vec<T>> {
        if let StatementResult::Rows(rows) = self {
            Some(rows)
        } else {
            None
        }
    }

    /// The affected-row count, if this is an update result.
    #[must_use]
    pub fn rows_affected(&self) -> Option<u64> {
        if let StatementResult::Affected(count) = self {
            Some(*count)
        } else {
            None
        }
    }
}
