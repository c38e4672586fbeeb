use std::fmt;

use rusqlite::Connection;

use crate::error::ScopeError;
use crate::results::ResultSet;
use crate::source::ScopeConnection;
use crate::types::{ConversionMode, ParamConverter, SqlValue};

use super::params::Params;
use super::query::build_result_set;

/// `ScopeConnection` implementation over one rusqlite connection.
///
/// `SQLite` has no auto-commit switch, so transactional mode is emulated
/// with explicit `BEGIN`/`COMMIT`/`ROLLBACK` statements and tracked in
/// `in_transaction`.
pub struct SqliteConnection {
    conn: Connection,
    in_transaction: bool,
}

impl SqliteConnection {
    pub(crate) fn new(conn: Connection) -> Self {
        Self {
            conn,
            in_transaction: false,
        }
    }

    /// The raw rusqlite connection.
    #[must_use]
    pub fn raw(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access to the raw rusqlite connection.
    ///
    /// Issuing transaction statements here desynchronizes the scope's view
    /// of the connection.
    pub fn raw_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("in_transaction", &self.in_transaction)
            .finish_non_exhaustive()
    }
}

impl ScopeConnection for SqliteConnection {
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), ScopeError> {
        if enabled {
            if self.in_transaction {
                self.conn.execute_batch("COMMIT")?;
                self.in_transaction = false;
            }
        } else if !self.in_transaction {
            self.conn.execute_batch("BEGIN")?;
            self.in_transaction = true;
        }
        Ok(())
    }

    fn auto_commit(&self) -> bool {
        !self.in_transaction
    }

    fn commit(&mut self) -> Result<(), ScopeError> {
        if !self.in_transaction {
            return Err(ScopeError::InvalidState(
                "no transaction is active on this connection".into(),
            ));
        }
        self.conn.execute_batch("COMMIT")?;
        self.in_transaction = false;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), ScopeError> {
        if !self.in_transaction {
            return Err(ScopeError::InvalidState(
                "no transaction is active on this connection".into(),
            ));
        }
        // SQLite aborts the transaction itself on certain errors; ROLLBACK
        // would then fail against no active transaction.
        if self.conn.is_autocommit() {
            self.in_transaction = false;
            return Ok(());
        }
        self.conn.execute_batch("ROLLBACK")?;
        self.in_transaction = false;
        Ok(())
    }

    fn execute_select(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<ResultSet, ScopeError> {
        let converted = <Params as ParamConverter>::convert_params(params, ConversionMode::Query)?;
        let mut stmt = self.conn.prepare(sql)?;
        build_result_set(&mut stmt, converted.as_values())
    }

    fn execute_dml(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64, ScopeError> {
        let converted =
            <Params as ParamConverter>::convert_params(params, ConversionMode::Execute)?;
        let mut stmt = self.conn.prepare(sql)?;
        let refs = converted.as_refs();
        let affected = stmt.execute(&refs[..])?;
        Ok(affected as u64)
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), ScopeError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn release(self) -> Result<(), ScopeError> {
        self.conn.close().map_err(|(_conn, e)| ScopeError::from(e))
    }
}
