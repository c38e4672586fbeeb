use std::thread::ThreadId;

use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;

/// Errors raised by scope, executor, and backend operations.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to acquire connection: {0}")]
    AcquisitionFailure(String),

    #[error("scope is confined to thread {owner:?}, but was accessed from {current:?}")]
    ThreadViolation { owner: ThreadId, current: ThreadId },

    #[error("invalid scope state: {0}")]
    InvalidState(String),

    #[error("failed to commit transaction: {0}")]
    CommitFailure(String),

    #[error("failed to roll back transaction: {0}")]
    RollbackFailure(String),

    #[error("failed to close scope: {0}")]
    CloseFailure(String),

    #[error("SQL execution error: {0}")]
    ExecutionFailure(String),

    #[error("parameter conversion error: {0}")]
    ParameterError(String),

    /// A primary failure with a secondary failure attached, e.g. a rollback
    /// that failed while the scope was already unwinding from an execution
    /// error. The secondary failure is reported alongside the primary one,
    /// never in place of it.
    #[error("{primary} (secondary: {secondary})")]
    WithSecondary {
        primary: Box<ScopeError>,
        secondary: Box<ScopeError>,
    },
}

impl ScopeError {
    /// Attach a secondary failure to this error.
    #[must_use]
    pub fn with_secondary(self, secondary: ScopeError) -> Self {
        ScopeError::WithSecondary {
            primary: Box::new(self),
            secondary: Box::new(secondary),
        }
    }

    /// The primary failure, unwrapping any attached secondary causes.
    #[must_use]
    pub fn primary(&self) -> &ScopeError {
        match self {
            ScopeError::WithSecondary { primary, .. } => primary.primary(),
            other => other,
        }
    }

    /// The attached secondary failure, if any.
    #[must_use]
    pub fn secondary(&self) -> Option<&ScopeError> {
        match self {
            ScopeError::WithSecondary { secondary, .. } => Some(secondary),
            _ => None,
        }
    }

    pub(crate) fn into_execution_failure(self) -> ScopeError {
        match self {
            e @ (ScopeError::ExecutionFailure(_) | ScopeError::WithSecondary { .. }) => e,
            other => ScopeError::ExecutionFailure(other.to_string()),
        }
    }

    pub(crate) fn into_acquisition_failure(self) -> ScopeError {
        match self {
            e @ ScopeError::AcquisitionFailure(_) => e,
            other => ScopeError::AcquisitionFailure(other.to_string()),
        }
    }
}
