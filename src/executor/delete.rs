use super::{ExecutionContext, Executor, eval};
use crate::core::DbResult;
use crate::parser::ast::{DeleteStmt, Statement};
use crate::result::QueryResult;

pub struct DeleteExecutor;

impl Executor for DeleteExecutor {
    fn name(&self) -> &'static str {
        "DELETE"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::Delete(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::Delete(delete) = stmt else {
            unreachable!();
        };

        self.execute_delete(delete, ctx)
    }
}

impl DeleteExecutor {
    fn execute_delete(&self, delete: &DeleteStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let table_handle = ctx.storage.get_table(&delete.table_name)?;
        let mut table = table_handle.write()?;
        let schema = table.schema().schema().clone();

        // No condition deletes every row.
        let mut doomed = Vec::new();
        for (id, row) in table.rows_iter() {
            if eval::matches(delete.selection.as_ref(), row, &schema, &delete.table_name)? {
                doomed.push(*id);
            }
        }

        let deleted = table.delete_rows(&doomed);
        Ok(QueryResult::affected(deleted))
    }
}
