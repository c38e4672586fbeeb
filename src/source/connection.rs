use crate::error::ScopeError;
use crate::results::ResultSet;
use crate::types::SqlValue;

/// The connection handle a [`ConnectionScope`](crate::ConnectionScope)
/// drives: transaction control on one side, statement execution on the
/// other.
///
/// Implementations are not transaction-aware beyond honoring these calls in
/// order; the scope decides when each is made.
pub trait ScopeConnection {
    /// Enable or disable auto-commit.
    ///
    /// Disabling opens an explicit transaction; enabling commits one that is
    /// still open. Engines without a native auto-commit switch emulate it
    /// with explicit transaction statements.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the change.
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), ScopeError>;

    /// Whether the connection is currently in auto-commit mode.
    fn auto_commit(&self) -> bool;

    /// Commit the open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open or the engine fails to
    /// commit.
    fn commit(&mut self) -> Result<(), ScopeError>;

    /// Roll back the open transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no transaction is open or the engine fails to
    /// roll back.
    fn rollback(&mut self) -> Result<(), ScopeError>;

    /// Execute a SELECT with positionally bound parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if preparation, binding, or execution fails.
    fn execute_select(&mut self, sql: &str, params: &[SqlValue])
    -> Result<ResultSet, ScopeError>;

    /// Execute a DML statement (INSERT, UPDATE, DELETE) with positionally
    /// bound parameters, returning the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns an error if preparation, binding, or execution fails.
    fn execute_dml(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64, ScopeError>;

    /// Execute a batch of statements with no parameters, e.g. DDL scripts.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the batch fails.
    fn execute_batch(&mut self, sql: &str) -> Result<(), ScopeError>;

    /// Release the connection (return it to its source, or close it).
    ///
    /// # Errors
    ///
    /// Returns an error if the release itself fails; the connection is gone
    /// either way.
    fn release(self) -> Result<(), ScopeError>
    where
        Self: Sized;
}
