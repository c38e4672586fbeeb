//! Scoped connection and transaction lifecycle management.
//!
//! A [`ConnectionScope`] owns one connection acquired from a
//! [`ConnectionSource`] for a bounded span of work. Transaction boundaries
//! are caller-controlled through `commit` and `rollback`; any failure during
//! `execute` on a transactional scope rolls the transaction back eagerly, and
//! the connection is released exactly once when the scope closes (or is
//! dropped), no matter how the scope exits.
//!
//! ```no_run
//! use sql_scope::prelude::*;
//!
//! fn main() -> Result<(), ScopeError> {
//!     let source = SqliteSource::open("app.db");
//!     let mut scope = ConnectionScope::open_transactional(&source)?;
//!     scope.execute(|client| {
//!         client.update(
//!             "INSERT INTO player (name) VALUES (?1);",
//!             &[SqlValue::Text("alice".into())],
//!         )
//!     })?;
//!     scope.commit()?;
//!     scope.close()?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod executor;
pub mod prelude;
pub mod results;
pub mod scope;
pub mod source;
#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(feature = "test-utils")]
pub mod test_utils;
pub mod types;

pub use error::ScopeError;
pub use executor::StatementExecutor;
pub use results::{ResultSet, Row, StatementResult};
pub use scope::ConnectionScope;
pub use source::{ConnectionSource, ScopeConnection};
pub use types::{ConversionMode, ParamConverter, SqlValue};
