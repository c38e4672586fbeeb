//! The connection-scope state machine.
//!
//! A scope owns one connection for its lifetime and walks a two-state
//! machine: `Active` until the first of commit, rollback, execute-triggered
//! rollback, or close-triggered rollback, then `Completed`. Once completed,
//! no further commit or rollback is attempted internally; the connection is
//! still released exactly once at close (or on drop).

use std::thread::{self, ThreadId};

use crate::error::ScopeError;
use crate::executor::StatementExecutor;
use crate::source::{ConnectionSource, ScopeConnection};

/// Exclusive, single-owner use of one acquired connection for a bounded span
/// of work.
///
/// Every operation must be invoked from the thread that opened the scope.
/// Closing consumes the scope, so a second close does not compile; a scope
/// dropped without an explicit [`close`](ConnectionScope::close) rolls back
/// and releases best-effort.
#[derive(Debug)]
pub struct ConnectionScope<C: ScopeConnection> {
    conn: Option<C>,
    transactional: bool,
    completed: bool,
    owner: ThreadId,
}

impl<C: ScopeConnection> ConnectionScope<C> {
    /// Open a non-transactional scope: every statement executes immediately
    /// in the connection's auto-commit mode.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::AcquisitionFailure` if the source cannot yield a
    /// live connection.
    pub fn open<S>(source: &S) -> Result<Self, ScopeError>
    where
        S: ConnectionSource<Conn = C>,
    {
        Self::acquire(source, false)
    }

    /// Open a transactional scope: auto-commit is disabled at open, and
    /// commit/rollback boundaries belong to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::AcquisitionFailure` if the source cannot yield a
    /// live connection or auto-commit cannot be disabled on it.
    pub fn open_transactional<S>(source: &S) -> Result<Self, ScopeError>
    where
        S: ConnectionSource<Conn = C>,
    {
        Self::acquire(source, true)
    }

    fn acquire<S>(source: &S, transactional: bool) -> Result<Self, ScopeError>
    where
        S: ConnectionSource<Conn = C>,
    {
        let mut conn = source
            .acquire()
            .map_err(ScopeError::into_acquisition_failure)?;
        if transactional && let Err(e) = conn.set_auto_commit(false) {
            // The connection was acquired but is unusable for this scope;
            // hand it back before reporting the open failure.
            if let Err(release) = conn.release() {
                tracing::warn!(error = %release, "failed to release connection after open failure");
            }
            return Err(ScopeError::AcquisitionFailure(format!(
                "could not disable auto-commit: {e}"
            )));
        }
        tracing::debug!(transactional, "connection scope opened");
        Ok(Self {
            conn: Some(conn),
            transactional,
            completed: false,
            owner: thread::current().id(),
        })
    }

    /// Whether this scope was opened transactionally.
    #[must_use]
    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// Whether the scope has reached its terminal state: no further commit
    /// or rollback will be attempted internally.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Run `op` against a [`StatementExecutor`] bound to the held
    /// connection.
    ///
    /// On a transactional scope that is not yet completed, a failure from
    /// `op` triggers an immediate rollback and marks the scope completed
    /// before the failure is returned. If that rollback itself fails, the
    /// rollback error is attached to the original failure as a secondary
    /// cause. Non-transactional and already-completed scopes propagate the
    /// failure untouched.
    ///
    /// A completed scope may still execute; statements then run in the
    /// connection's implicit auto-commit mode.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ThreadViolation` off the owner thread, or the
    /// failure produced by `op`.
    pub fn execute<T, F>(&mut self, op: F) -> Result<T, ScopeError>
    where
        F: FnOnce(&mut StatementExecutor<'_, C>) -> Result<T, ScopeError>,
    {
        self.ensure_owner_thread()?;
        let outcome = {
            let conn = self.conn_mut()?;
            let mut executor = StatementExecutor::new(conn);
            op(&mut executor)
        };
        match outcome {
            Ok(value) => Ok(value),
            Err(primary) => Err(self.fail_execute(primary)),
        }
    }

    /// Commit the transaction. Only valid on a transactional scope that has
    /// not completed.
    ///
    /// On failure the scope does not auto-correct: `completed` stays false,
    /// and the caller decides whether to retry the commit or roll back.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ThreadViolation` off the owner thread,
    /// `ScopeError::InvalidState` on a non-transactional or completed scope,
    /// or `ScopeError::CommitFailure` if the engine fails to commit.
    pub fn commit(&mut self) -> Result<(), ScopeError> {
        self.ensure_owner_thread()?;
        if !self.transactional {
            return Err(ScopeError::InvalidState(
                "cannot commit a non-transactional scope".into(),
            ));
        }
        if self.completed {
            return Err(ScopeError::InvalidState(
                "transaction already completed".into(),
            ));
        }
        let conn = self.conn_mut()?;
        conn.commit()
            .map_err(|e| ScopeError::CommitFailure(e.to_string()))?;
        self.completed = true;
        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll back the transaction. Only valid on a transactional scope that
    /// has not completed.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ThreadViolation` off the owner thread,
    /// `ScopeError::InvalidState` on a non-transactional or completed scope,
    /// or `ScopeError::RollbackFailure` if the engine fails to roll back
    /// (`completed` stays false in that case).
    pub fn rollback(&mut self) -> Result<(), ScopeError> {
        self.ensure_owner_thread()?;
        if !self.transactional {
            return Err(ScopeError::InvalidState(
                "cannot roll back a non-transactional scope".into(),
            ));
        }
        if self.completed {
            return Err(ScopeError::InvalidState(
                "transaction already completed".into(),
            ));
        }
        let conn = self.conn_mut()?;
        conn.rollback()
            .map_err(|e| ScopeError::RollbackFailure(e.to_string()))?;
        self.completed = true;
        tracing::debug!("transaction rolled back");
        Ok(())
    }

    /// Close the scope: roll back any uncommitted transaction, then release
    /// the connection unconditionally.
    ///
    /// If both the rollback and the release fail, the rollback failure is
    /// returned as the primary error with the release failure attached as a
    /// secondary cause.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::ThreadViolation` off the owner thread (the drop
    /// backstop still releases the connection), or
    /// `ScopeError::CloseFailure` if the close-time rollback or the release
    /// fails.
    pub fn close(self) -> Result<(), ScopeError> {
        self.ensure_owner_thread()?;
        let mut this = self;
        let Some(mut conn) = this.conn.take() else {
            return Ok(());
        };
        let mut rollback_failure = None;
        if this.transactional && !this.completed {
            match conn.rollback() {
                Ok(()) => {
                    this.completed = true;
                    tracing::debug!("uncommitted transaction rolled back on close");
                }
                Err(e) => {
                    rollback_failure = Some(ScopeError::CloseFailure(format!(
                        "rollback on close failed: {e}"
                    )));
                }
            }
        }
        let release = conn.release();
        tracing::debug!("connection scope closed");
        match (rollback_failure, release) {
            (None, Ok(())) => Ok(()),
            (Some(primary), Ok(())) => Err(primary),
            (None, Err(e)) => Err(ScopeError::CloseFailure(format!(
                "connection release failed: {e}"
            ))),
            (Some(primary), Err(e)) => Err(primary.with_secondary(ScopeError::CloseFailure(
                format!("connection release failed: {e}"),
            ))),
        }
    }

    fn fail_execute(&mut self, primary: ScopeError) -> ScopeError {
        if !self.transactional || self.completed {
            return primary;
        }
        // Completed regardless of the rollback outcome, so later failures do
        // not retry it.
        self.completed = true;
        let Some(conn) = self.conn.as_mut() else {
            return primary;
        };
        match conn.rollback() {
            Ok(()) => {
                tracing::debug!("statement failure rolled back the open transaction");
                primary
            }
            Err(e) => primary.with_secondary(ScopeError::RollbackFailure(e.to_string())),
        }
    }

    fn conn_mut(&mut self) -> Result<&mut C, ScopeError> {
        self.conn
            .as_mut()
            .ok_or_else(|| ScopeError::InvalidState("scope already closed".into()))
    }

    fn ensure_owner_thread(&self) -> Result<(), ScopeError> {
        let current = thread::current().id();
        if current != self.owner {
            return Err(ScopeError::ThreadViolation {
                owner: self.owner,
                current,
            });
        }
        Ok(())
    }
}

impl<C: ScopeConnection> Drop for ConnectionScope<C> {
    fn drop(&mut self) {
        let Some(mut conn) = self.conn.take() else {
            return;
        };
        if self.transactional
            && !self.completed
            && let Err(e) = conn.rollback()
        {
            tracing::warn!(error = %e, "best-effort rollback failed while dropping scope");
        }
        if let Err(e) = conn.release() {
            tracing::warn!(error = %e, "connection release failed while dropping scope");
        }
    }
}
