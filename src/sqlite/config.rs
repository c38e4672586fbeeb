use std::time::Duration;

use rusqlite::Connection;

use crate::error::ScopeError;
use crate::source::ConnectionSource;

use super::connection::SqliteConnection;

/// Options for opening `SQLite` connections.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub wal: bool,
    pub busy_timeout: Option<Duration>,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            wal: true,
            busy_timeout: None,
        }
    }

    fn in_memory(&self) -> bool {
        self.db_path == ":memory:" || self.db_path.starts_with("file::memory:")
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Build a [`SqliteSource`] from these options.
    #[must_use]
    pub fn build(self) -> SqliteSource {
        SqliteSource::new(self.finish())
    }
}

/// A [`ConnectionSource`] that opens one `SQLite` connection per acquire.
///
/// Note that an in-memory path yields an independent, empty database on
/// every acquire; scopes that must observe each other's work need a
/// file-backed database.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    opts: SqliteOptions,
}

impl SqliteSource {
    #[must_use]
    pub fn new(opts: SqliteOptions) -> Self {
        Self { opts }
    }

    /// A source over the given database path with default options.
    #[must_use]
    pub fn open(db_path: impl Into<String>) -> Self {
        Self::new(SqliteOptions::new(db_path))
    }

    /// A source over a fresh in-memory database per acquire.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(SqliteOptions::new(":memory:"))
    }

    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }
}

impl ConnectionSource for SqliteSource {
    type Conn = SqliteConnection;

    fn acquire(&self) -> Result<SqliteConnection, ScopeError> {
        let conn = if self.opts.in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&self.opts.db_path)?
        };
        if let Some(timeout) = self.opts.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        if self.opts.wal && !self.opts.in_memory() {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        Ok(SqliteConnection::new(conn))
    }
}
