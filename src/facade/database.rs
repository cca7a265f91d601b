use crate::core::{DbError, DbResult};
use crate::executor::ddl::{CreateTableExecutor, DropTableExecutor};
use crate::executor::delete::DeleteExecutor;
use crate::executor::dml::InsertExecutor;
use crate::executor::query::QueryExecutor;
use crate::executor::update::UpdateExecutor;
use crate::executor::{ExecutionContext, ExecutorPipeline};
use crate::interface::StatementExecutor;
use crate::parser::SqlParserAdapter;
use crate::result::QueryResult;
use crate::storage::InMemoryStorage;

/// Small in-memory SQL engine that understands the statements the ORM emits.
///
/// Every method takes `&self`; tables carry their own locks, so an `InMemoryDB`
/// can be shared behind an `Arc` by several entity managers.
pub struct InMemoryDB {
    parser: SqlParserAdapter,
    storage: InMemoryStorage,
    executor_pipeline: ExecutorPipeline,
}

impl InMemoryDB {
    pub fn new() -> Self {
        let mut pipeline = ExecutorPipeline::new();

        // DDL
        pipeline.register(Box::new(CreateTableExecutor));
        pipeline.register(Box::new(DropTableExecutor));

        // DML
        pipeline.register(Box::new(InsertExecutor));
        pipeline.register(Box::new(DeleteExecutor));
        pipeline.register(Box::new(UpdateExecutor));

        pipeline.register(Box::new(QueryExecutor));

        Self {
            parser: SqlParserAdapter::new(),
            storage: InMemoryStorage::new(),
            executor_pipeline: pipeline,
        }
    }

    /// Runs every statement in `sql` in order and returns the last result.
    pub fn execute(&self, sql: &str) -> DbResult<QueryResult> {
        log::debug!("executing: {}", sql);

        let statements = self.parser.parse(sql)?;
        if statements.is_empty() {
            return Err(DbError::ParseError("No statement found".into()));
        }

        let ctx = ExecutionContext::new(&self.storage);
        let mut last = QueryResult::empty();
        for stmt in &statements {
            last = self.executor_pipeline.execute(stmt, &ctx)?;
        }
        Ok(last)
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.storage.table_exists(name)
    }

    pub fn list_tables(&self) -> DbResult<Vec<String>> {
        self.storage.list_tables()
    }

    pub fn row_count(&self, name: &str) -> DbResult<usize> {
        let table = self.storage.get_table(name)?;
        let guard = table.read()?;
        Ok(guard.row_count())
    }
}

impl Default for InMemoryDB {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExecutor for InMemoryDB {
    fn execute(&self, sql: &str) -> DbResult<usize> {
        InMemoryDB::execute(self, sql).map(|result| result.affected_rows())
    }

    fn query(&self, sql: &str) -> DbResult<QueryResult> {
        InMemoryDB::execute(self, sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn db_with_users() -> InMemoryDB {
        let db = InMemoryDB::new();
        db.execute(
            "CREATE TABLE users (id BIGINT AUTO_INCREMENT PRIMARY KEY, name VARCHAR(255) NOT NULL, age INT)",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_create_and_list_tables() {
        let db = db_with_users();
        assert!(db.table_exists("users"));
        assert!(db.table_exists("USERS"));
        assert_eq!(db.list_tables().unwrap(), vec!["users".to_string()]);
    }

    #[test]
    fn test_create_existing_table_fails() {
        let db = db_with_users();
        let err = db.execute("CREATE TABLE users (id INT PRIMARY KEY)").unwrap_err();
        assert!(matches!(err, DbError::TableExists(_)));

        db.execute("CREATE TABLE IF NOT EXISTS users (id INT PRIMARY KEY)")
            .unwrap();
    }

    #[test]
    fn test_insert_and_select() {
        let db = db_with_users();
        let inserted = StatementExecutor::execute(
            &db,
            "INSERT INTO users (id, name, age) VALUES (1, 'alice', 30)",
        )
        .unwrap();
        assert_eq!(inserted, 1);

        let result = db.execute("SELECT id, name, age FROM users WHERE id = 1").unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.columns, vec!["id", "name", "age"]);
        assert_eq!(result.rows[0][1], Value::Text("alice".into()));
    }

    #[test]
    fn test_auto_increment_assigns_ids() {
        let db = db_with_users();
        db.execute("INSERT INTO users (name, age) VALUES ('a', 1)").unwrap();
        db.execute("INSERT INTO users (name, age) VALUES ('b', 2)").unwrap();

        let result = db.execute("SELECT id FROM users").unwrap();
        let ids: Vec<Value> = result.rows.iter().map(|r| r[0].clone()).collect();
        assert_eq!(ids, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let db = db_with_users();
        db.execute("INSERT INTO users (id, name) VALUES (1, 'a')").unwrap();
        let err = db
            .execute("INSERT INTO users (id, name) VALUES (1, 'b')")
            .unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
        assert_eq!(db.row_count("users").unwrap(), 1);
    }

    #[test]
    fn test_not_null_enforced() {
        let db = db_with_users();
        let err = db.execute("INSERT INTO users (id, age) VALUES (1, 3)").unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation(_)));
    }

    #[test]
    fn test_update_and_delete_report_affected_rows() {
        let db = db_with_users();
        db.execute("INSERT INTO users (id, name, age) VALUES (1, 'a', 1), (2, 'b', 2)")
            .unwrap();

        let updated = StatementExecutor::execute(&db, "UPDATE users SET age = 10 WHERE id = 2").unwrap();
        assert_eq!(updated, 1);

        let deleted = StatementExecutor::execute(&db, "delete FROM users where id = 1").unwrap();
        assert_eq!(deleted, 1);
        let deleted = StatementExecutor::execute(&db, "delete FROM users where id = 1").unwrap();
        assert_eq!(deleted, 0);

        let result = db.execute("SELECT * FROM users").unwrap();
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.rows[0][2], Value::Integer(10));
    }

    #[test]
    fn test_unknown_table_and_column() {
        let db = db_with_users();
        assert!(matches!(
            db.execute("SELECT * FROM missing").unwrap_err(),
            DbError::TableNotFound(_)
        ));
        assert!(matches!(
            db.execute("SELECT nope FROM users").unwrap_err(),
            DbError::ColumnNotFound(_, _)
        ));
    }

    #[test]
    fn test_drop_table() {
        let db = db_with_users();
        db.execute("DROP TABLE users").unwrap();
        assert!(!db.table_exists("users"));
        assert!(matches!(
            db.execute("DROP TABLE users").unwrap_err(),
            DbError::TableNotFound(_)
        ));
        db.execute("DROP TABLE IF EXISTS users").unwrap();
    }
}
