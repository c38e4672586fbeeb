// SQLite backend
//
// - config: source options and connection opening
// - connection: the ScopeConnection implementation
// - params: parameter conversion between SqlValue and rusqlite types
// - query: result extraction and building

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder, SqliteSource};
pub use connection::SqliteConnection;
pub use params::Params as SqliteParams;
pub use query::build_result_set;
