use super::{ExecutionContext, Executor, eval};
use crate::core::{DbError, DbResult, Row};
use crate::parser::ast::{Statement, UpdateStmt};
use crate::result::QueryResult;

pub struct UpdateExecutor;

impl Executor for UpdateExecutor {
    fn name(&self) -> &'static str {
        "UPDATE"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::Update(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::Update(update) = stmt else {
            unreachable!();
        };

        self.execute_update(update, ctx)
    }
}

impl UpdateExecutor {
    fn execute_update(&self, update: &UpdateStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let table_handle = ctx.storage.get_table(&update.table_name)?;
        let mut table = table_handle.write()?;
        let schema = table.schema().schema().clone();

        let targets = update
            .assignments
            .iter()
            .map(|assignment| {
                schema
                    .find_column_index(&assignment.column)
                    .map(|idx| (idx, &assignment.value))
                    .ok_or_else(|| {
                        DbError::ColumnNotFound(assignment.column.clone(), update.table_name.clone())
                    })
            })
            .collect::<DbResult<Vec<_>>>()?;

        let mut updates: Vec<(usize, Row)> = Vec::new();
        for (id, row) in table.rows_iter() {
            if !eval::matches(update.selection.as_ref(), row, &schema, &update.table_name)? {
                continue;
            }

            let mut new_row = row.clone();
            for (idx, expr) in &targets {
                new_row[*idx] = eval::evaluate(expr, row, &schema, &update.table_name)?;
            }
            updates.push((*id, new_row));
        }

        let count = table.update_all(updates)?;

        Ok(QueryResult::affected(count))
    }
}
