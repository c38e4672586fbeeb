//! The statement executor: parameterized queries and updates against one
//! connection, with row mapping. It has no transaction awareness; boundaries
//! belong to the owning [`ConnectionScope`](crate::ConnectionScope).

use crate::error::ScopeError;
use crate::results::{Row, StatementResult};
use crate::source::ScopeConnection;
use crate::types::SqlValue;

/// Executes statements against a borrowed connection.
///
/// Inside [`ConnectionScope::execute`](crate::ConnectionScope::execute) the
/// scope constructs one of these over its held connection; it can also be
/// bound directly to a connection that is managed elsewhere.
pub struct StatementExecutor<'conn, C> {
    conn: &'conn mut C,
}

impl<'conn, C: ScopeConnection> StatementExecutor<'conn, C> {
    /// Bind an executor to a connection.
    pub fn new(conn: &'conn mut C) -> Self {
        Self { conn }
    }

    /// Execute a query, mapping each result row through `mapper` in
    /// result-set order.
    ///
    /// Parameters are bound positionally, in order. No retry is attempted;
    /// an execution or mapping fault is propagated as it happened.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ExecutionFailure` if execution fails, or the
    /// mapper's error for the first row it rejects.
    pub fn query<T, M>(
        &mut self,
        sql: &str,
        mut mapper: M,
        params: &[SqlValue],
    ) -> Result<StatementResult<T>, ScopeError>
    where
        M: FnMut(&Row) -> Result<T, ScopeError>,
    {
        let set = self
            .conn
            .execute_select(sql, params)
            .map_err(ScopeError::into_execution_failure)?;
        let mut mapped = Vec::with_capacity(set.len());
        for row in &set {
            mapped.push(mapper(row).map_err(ScopeError::into_execution_failure)?);
        }
        Ok(StatementResult::Rows(mapped))
    }

    /// Execute a DML statement (INSERT, UPDATE, DELETE), returning the
    /// affected-row count reported by the engine.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ExecutionFailure` if execution fails.
    pub fn update(&mut self, sql: &str, params: &[SqlValue]) -> Result<StatementResult, ScopeError> {
        let affected = self
            .conn
            .execute_dml(sql, params)
            .map_err(ScopeError::into_execution_failure)?;
        Ok(StatementResult::Affected(affected))
    }

    /// Execute a batch of statements with no parameters, e.g. a DDL script.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ExecutionFailure` if any statement fails.
    pub fn batch(&mut self, sql: &str) -> Result<(), ScopeError> {
        self.conn
            .execute_batch(sql)
            .map_err(ScopeError::into_execution_failure)
    }

    /// The underlying connection, for advanced direct use.
    ///
    /// Mutating connection state the scope manages (auto-commit, transaction
    /// boundaries) voids the scope's consistency guarantees.
    pub fn connection(&mut self) -> &mut C {
        self.conn
    }
}
