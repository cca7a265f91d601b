use super::ExecutionContext;
use crate::core::{DbError, DbResult};
use crate::parser::ast::Statement;
use crate::result::QueryResult;

pub trait Executor: Send + Sync {
    /// Name of the executor, for logs.
    fn name(&self) -> &'static str;

    fn can_handle(&self, stmt: &Statement) -> bool;

    fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult>;
}

/// Dispatches a statement to the first executor that accepts it.
pub struct ExecutorPipeline {
    executors: Vec<Box<dyn Executor>>,
}

impl ExecutorPipeline {
    pub fn new() -> Self {
        Self {
            executors: Vec::new(),
        }
    }

    pub fn register(&mut self, executor: Box<dyn Executor>) {
        self.executors.push(executor);
    }

    pub fn execute(&self, stmt: &Statement, ctx: &ExecutionContext<'_>) -> DbResult<QueryResult> {
        for executor in &self.executors {
            if executor.can_handle(stmt) {
                log::trace!("dispatching statement to {}", executor.name());
                return executor.execute(stmt, ctx);
            }
        }

        Err(DbError::UnsupportedOperation(
            "No executor found for statement".into(),
        ))
    }
}

impl Default for ExecutorPipeline {
    fn default() -> Self {
        Self::new()
    }
}
