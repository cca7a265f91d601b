use super::{ExecutionContext, Executor};
use crate::core::{Column, DbError, DbResult};
use crate::parser::ast::{ColumnDef, CreateTableStmt, DropTableStmt, Statement};
use crate::result::QueryResult;
use crate::storage::TableSchema;

pub struct CreateTableExecutor;

impl Executor for CreateTableExecutor {
    fn name(&self) -> &'static str {
        "CREATE_TABLE"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::CreateTable(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::CreateTable(create) = stmt else {
            unreachable!();
        };

        self.execute_create_table(create, ctx)
    }
}

impl CreateTableExecutor {
    fn execute_create_table(&self, create: &CreateTableStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let columns = create.columns.iter().map(to_column).collect();

        match ctx.storage.create_table(TableSchema::new(&create.table_name, columns)) {
            Err(DbError::TableExists(_)) if create.if_not_exists => Ok(QueryResult::empty()),
            result => result.map(|_| QueryResult::empty()),
        }
    }
}

fn to_column(def: &ColumnDef) -> Column {
    let mut column = Column::new(&def.name, def.data_type);
    if !def.nullable {
        column = column.not_null();
    }
    if def.primary_key {
        column = column.primary_key();
    }
    if def.auto_increment {
        column = column.auto_increment();
    }
    column
}

pub struct DropTableExecutor;

impl Executor for DropTableExecutor {
    fn name(&self) -> &'static str {
        "DROP_TABLE"
    }

    fn can_handle(&self, stmt: &Statement) -> bool {
        matches!(stmt, Statement::DropTable(_))
    }

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        let Statement::DropTable(drop) = stmt else {
            unreachable!();
        };

        self.execute_drop_table(drop, ctx)
    }
}

impl DropTableExecutor {
    fn execute_drop_table(&self, drop: &DropTableStmt, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        match ctx.storage.drop_table(&drop.table_name) {
            Err(DbError::TableNotFound(_)) if drop.if_exists => Ok(QueryResult::empty()),
            result => result.map(|_| QueryResult::empty()),
        }
    }
}
