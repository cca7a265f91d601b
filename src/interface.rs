use std::sync::Arc;

use crate::core::DbResult;
use crate::result::QueryResult;

/// Anything that can run SQL text on behalf of the ORM.
///
/// The ORM layer only ever talks to a database through this trait. `InMemoryDB`
/// implements it for tests and demos; wrap a real driver to implement it for
/// production use.
pub trait StatementExecutor: Send + Sync {
    /// Execute a statement that modifies data or schema (INSERT, UPDATE, DELETE, DDL).
    /// Returns the number of affected rows.
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute a statement that is expected to return rows (SELECT).
    fn query(&self, sql: &str) -> DbResult<QueryResult>;
}

impl<E: StatementExecutor + ?Sized> StatementExecutor for Arc<E> {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        (**self).execute(sql)
    }

    fn query(&self, sql: &str) -> DbResult<QueryResult> {
        (**self).query(sql)
    }
}
