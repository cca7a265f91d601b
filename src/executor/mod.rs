pub mod context;
pub mod ddl;
pub mod delete;
pub mod dml;
pub mod eval;
pub mod executor;
pub mod query;
pub mod update;

pub use context::ExecutionContext;
pub use executor::{Executor, ExecutorPipeline};
