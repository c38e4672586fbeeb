// Collaborator contracts at the scope boundary:
// - mod.rs: ConnectionSource, the factory that yields one live connection
// - connection.rs: ScopeConnection, the handle a scope drives

pub mod connection;

pub use connection::ScopeConnection;

use crate::error::ScopeError;

/// A source of live database connections.
///
/// Pooling, reconnection, and credential handling all live behind this trait;
/// the scope only asks for one connection at open and hands it back through
/// [`ScopeConnection::release`] at close.
pub trait ConnectionSource {
    /// The connection type this source yields.
    type Conn: ScopeConnection;

    /// Acquire one live connection.
    ///
    /// # Errors
    ///
    /// Returns an error if no live connection can be produced; the scope
    /// surfaces it as `ScopeError::AcquisitionFailure`.
    fn acquire(&self) -> Result<Self::Conn, ScopeError>;
}
