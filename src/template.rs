//! Thin statement-running layer between the entity code and a
//! [`StatementExecutor`].

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{OrmError, Result};
use crate::interface::StatementExecutor;
use crate::mapping::Entity;
use crate::result::ResultRow;

/// Turns one result row into a value.
pub trait RowMapper<T> {
    fn map_row(&self, row: &ResultRow<'_>) -> Result<T>;
}

impl<T, F> RowMapper<T> for F
where
    F: Fn(&ResultRow<'_>) -> Result<T>,
{
    fn map_row(&self, row: &ResultRow<'_>) -> Result<T> {
        self(row)
    }
}

/// Maps rows through [`Entity::from_row`].
pub struct EntityRowMapper<T>(PhantomData<fn() -> T>);

impl<T> EntityRowMapper<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EntityRowMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> RowMapper<T> for EntityRowMapper<T> {
    fn map_row(&self, row: &ResultRow<'_>) -> Result<T> {
        T::from_row(row)
    }
}

#[derive(Clone)]
pub struct SqlTemplate {
    executor: Arc<dyn StatementExecutor>,
    show_sql: bool,
}

impl SqlTemplate {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            executor,
            show_sql: false,
        }
    }

    /// Log every statement at `info` instead of `debug`.
    pub fn with_show_sql(mut self, show_sql: bool) -> Self {
        self.show_sql = show_sql;
        self
    }

    pub fn executor(&self) -> &Arc<dyn StatementExecutor> {
        &self.executor
    }

    /// Runs a modifying statement and returns the affected row count.
    pub fn execute(&self, sql: &str) -> Result<usize> {
        self.log(sql);
        Ok(self.executor.execute(sql)?)
    }

    /// Runs a query that must yield exactly one row.
    pub fn query_for_object<T, M>(&self, sql: &str, mapper: &M) -> Result<T>
    where
        M: RowMapper<T> + ?Sized,
    {
        self.log(sql);
        let result = self.executor.query(sql)?;

        match result.row_count() {
            0 => Err(OrmError::NotFound(format!("no row returned by: {}", sql))),
            1 => {
                let row = ResultRow::new(&result.columns, &result.rows[0]);
                mapper.map_row(&row)
            }
            n => Err(OrmError::mapping(format!(
                "expected one row, got {} from: {}",
                n, sql
            ))),
        }
    }

    /// Runs a query and maps every row, keeping result-set order.
    pub fn query_for_list<T, M>(&self, sql: &str, mapper: &M) -> Result<Vec<T>>
    where
        M: RowMapper<T> + ?Sized,
    {
        self.log(sql);
        let result = self.executor.query(sql)?;
        result.rows_iter().map(|row| mapper.map_row(&row)).collect()
    }

    fn log(&self, sql: &str) {
        if self.show_sql {
            info!(target: "rustmemorm::sql", "{}", sql);
        } else {
            debug!(target: "rustmemorm::sql", "{}", sql);
        }
    }
}

impl std::fmt::Debug for SqlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlTemplate")
            .field("show_sql", &self.show_sql)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDB;
    use crate::core::Value;

    fn template() -> SqlTemplate {
        let db = InMemoryDB::new();
        db.execute("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20))")
            .unwrap();
        db.execute("INSERT INTO t (id, name) VALUES (1, 'a'), (2, 'b')")
            .unwrap();
        SqlTemplate::new(Arc::new(db))
    }

    fn name_mapper(row: &ResultRow<'_>) -> Result<String> {
        row.get("name")
    }

    #[test]
    fn test_query_for_object() {
        let template = template();
        let name = template
            .query_for_object("SELECT name FROM t WHERE id = 2", &name_mapper)
            .unwrap();
        assert_eq!(name, "b");
    }

    #[test]
    fn test_query_for_object_no_rows() {
        let template = template();
        let err = template
            .query_for_object("SELECT name FROM t WHERE id = 9", &name_mapper)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_query_for_object_many_rows() {
        let template = template();
        let err = template
            .query_for_object("SELECT name FROM t", &name_mapper)
            .unwrap_err();
        assert!(err.is_mapping());
    }

    #[test]
    fn test_query_for_list_keeps_order() {
        let template = template();
        let names = template
            .query_for_list("SELECT name FROM t", &name_mapper)
            .unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_execute_returns_affected_rows() {
        let template = template();
        assert_eq!(template.execute("UPDATE t SET name = 'z'").unwrap(), 2);
    }

    #[test]
    fn test_executor_errors_pass_through() {
        let template = template();
        let err = template.execute("DROP TABLE missing").unwrap_err();
        assert!(matches!(err, OrmError::Execution(_)));

        let closure = |row: &ResultRow<'_>| -> Result<Value> {
            Ok(row.value("id").cloned().unwrap_or(Value::Null))
        };
        let ids = template.query_for_list("SELECT id FROM t", &closure).unwrap();
        assert_eq!(ids, vec![Value::Integer(1), Value::Integer(2)]);
    }
}
