//! Convenient imports for common functionality.

pub use crate::error::ScopeError;
pub use crate::executor::StatementExecutor;
pub use crate::results::{ResultSet, Row, StatementResult};
pub use crate::scope::ConnectionScope;
pub use crate::source::{ConnectionSource, ScopeConnection};
pub use crate::types::{ConversionMode, ParamConverter, SqlValue};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteConnection, SqliteOptions, SqliteOptionsBuilder, SqliteSource};
