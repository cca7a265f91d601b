use super::{ExecutionContext, Executor};
use crate::core::{DbError, DbResult, Row, Schema, Value};
use crate::parser::ast::{Expr, InsertStmt, Statement};
use crate::result::QueryResult;

pub struct InsertExecutor;

impl Executor for InsertExecutor {
    fn name(&self) -> &'static str {
        "INSERT"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::Insert(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::Insert(insert) = stmt else {
            unreachable!();
        };

        self.execute_insert(insert, ctx)
    }
}

impl InsertExecutor {
    fn execute_insert(&self, insert: &InsertStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let table_handle = ctx.storage.get_table(&insert.table_name)?;
        let mut table = table_handle.write()?;
        let schema = table.schema().schema().clone();

        let rows: Vec<Row> = insert
            .values
            .iter()
            .map(|exprs| self.build_row(insert, exprs, &schema))
            .collect::<DbResult<Vec<_>>>()?;

        // A bad row anywhere in the batch inserts nothing.
        let count = table.insert_all(rows)?;

        Ok(QueryResult::affected(count))
    }

    /// Places each literal in its target column; unnamed columns get NULL.
    fn build_row(&self, insert: &InsertStmt, exprs: &[Expr], schema: &Schema) -> DbResult<Row> {
        let targets: Vec<usize> = match &insert.columns {
            None => (0..schema.column_count()).collect(),
            Some(names) => names
                .iter()
                .map(|name| {
                    schema.find_column_index(name).ok_or_else(|| {
                        DbError::ColumnNotFound(name.clone(), insert.table_name.clone())
                    })
                })
                .collect::<DbResult<Vec<_>>>()?,
        };

        if exprs.len() != targets.len() {
            return Err(DbError::ExecutionError(format!(
                "Expected {} values, got {}",
                targets.len(),
                exprs.len()
            )));
        }

        let mut row = vec![Value::Null; schema.column_count()];
        for (idx, expr) in targets.into_iter().zip(exprs) {
            row[idx] = match expr {
                Expr::Literal(value) => value.clone(),
                _ => {
                    return Err(DbError::UnsupportedOperation(
                        "Only literal values supported in INSERT".into(),
                    ));
                }
            };
        }
        Ok(row)
    }
}
