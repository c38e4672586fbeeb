// Result model shared by every backend:
// - row: one result row with shared column metadata
// - result_set: an ordered collection of rows
// - statement: the outcome of one executed statement

pub mod result_set;
pub mod row;
pub mod statement;

pub use result_set::ResultSet;
pub use row::Row;
pub use statement::StatementResult;
