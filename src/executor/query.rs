use super::{ExecutionContext, Executor, eval};
use crate::core::{DbError, DbResult, Row};
use crate::parser::ast::{QueryStmt, SelectItem, Statement};
use crate::result::QueryResult;

pub struct QueryExecutor;

impl Executor for QueryExecutor {
    fn name(&self) -> &'static str {
        "QUERY"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::Query(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::Query(query) = stmt else {
            unreachable!();
        };

        self.execute_query(query, ctx)
    }
}

impl QueryExecutor {
    fn execute_query(&self, query: &QueryStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let table_handle = ctx.storage.get_table(&query.table_name)?;
        let table = table_handle.read()?;
        let schema = table.schema().schema();

        let mut indexes = Vec::new();
        let mut columns = Vec::new();
        for item in &query.projection {
            match item {
                SelectItem::Wildcard => {
                    indexes.extend(0..schema.column_count());
                    columns.extend(schema.column_names());
                }
                SelectItem::Column(name) => {
                    let idx = schema.find_column_index(name).ok_or_else(|| {
                        DbError::ColumnNotFound(name.clone(), query.table_name.clone())
                    })?;
                    indexes.push(idx);
                    columns.push(name.clone());
                }
            }
        }

        // Insertion order; no implicit sort.
        let mut rows: Vec<Row> = Vec::new();
        for (_, row) in table.rows_iter() {
            if eval::matches(query.selection.as_ref(), row, schema, &query.table_name)? {
                rows.push(indexes.iter().map(|idx| row[*idx].clone()).collect());
            }
        }

        Ok(QueryResult::new(columns, rows))
    }
}
