// ============================================================================
// RustMemORM Library
// ============================================================================

// Lets `#[derive(Entity)]` output use `::rustmemorm::` paths inside this crate too.
extern crate self as rustmemorm;

pub mod core;
pub mod mapping;
pub mod dialect;
pub mod sql;
pub mod result;
pub mod interface;
pub mod template;
pub mod entity;
pub mod config;
pub mod facade;
mod parser;
mod executor;
mod storage;

// Re-export main types for convenience
pub use core::{DbError, DbResult, OrmError, Result, Value};
pub use mapping::{Entity, EntityColumn, EntityDescriptor, EntityMetadata, FieldDescriptor, FieldType};
pub use rustmemorm_derive::Entity;
pub use dialect::{Dialect, H2Dialect, MySqlDialect, PostgresDialect};
pub use sql::{
    CreateQueryBuilder, DeleteQueryBuilder, DropQueryBuilder, FindAllQueryBuilder,
    FindByIdQueryBuilder, InsertQueryBuilder, UpdateQueryBuilder,
};
pub use result::{QueryResult, ResultRow};
pub use interface::StatementExecutor;
pub use template::{EntityRowMapper, RowMapper, SqlTemplate};
pub use entity::{EntityLoader, EntityManager, EntityManagerImpl, EntityPersister, SimpleEntityManager};
pub use config::{DialectKind, OrmConfig};
pub use facade::InMemoryDB;
