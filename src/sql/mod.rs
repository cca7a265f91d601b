//! Statement builders. Each one turns metadata, a dialect and optionally an
//! instance or identifier into a SQL string; none of them keeps state
//! between calls.

pub mod ddl;
pub mod dml;
pub mod select;

pub use ddl::{CreateQueryBuilder, DropQueryBuilder};
pub use dml::{DeleteQueryBuilder, InsertQueryBuilder, UpdateQueryBuilder};
pub use select::{FindAllQueryBuilder, FindByIdQueryBuilder};

use crate::core::{OrmError, Result, Value};
use crate::dialect::Dialect;
use crate::mapping::{Entity, EntityColumn, EntityMetadata};

/// Reads the current value behind `column` from `entity`. NaN and the
/// infinities have no SQL literal and are rejected.
pub(crate) fn column_value<T: Entity>(
    metadata: &EntityMetadata,
    entity: &T,
    column: &EntityColumn,
) -> Result<Value> {
    let value = entity.field_value(column.field_name()).ok_or_else(|| {
        OrmError::mapping(format!(
            "`{}` exposes no value for field '{}'",
            metadata.type_name(),
            column.field_name()
        ))
    })?;

    match value {
        Value::Float(f) if !f.is_finite() => Err(OrmError::mapping(format!(
            "`{}` field '{}' holds {}, which has no SQL literal",
            metadata.type_name(),
            column.field_name(),
            f
        ))),
        value => Ok(value),
    }
}

/// Identifier value of `entity`; a NULL identifier cannot address a row.
pub(crate) fn id_value<T: Entity>(metadata: &EntityMetadata, entity: &T) -> Result<Value> {
    let value = column_value(metadata, entity, metadata.id_column())?;
    if value.is_null() {
        return Err(OrmError::mapping(format!(
            "`{}` has no identifier value",
            metadata.type_name()
        )));
    }
    Ok(value)
}

pub(crate) fn column_list<'c>(
    dialect: &dyn Dialect,
    columns: impl IntoIterator<Item = &'c EntityColumn>,
) -> String {
    columns
        .into_iter()
        .map(|column| dialect.quote_identifier(column.column_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `<id column> = <literal>`
pub(crate) fn id_predicate(metadata: &EntityMetadata, dialect: &dyn Dialect, id: &Value) -> String {
    format!(
        "{} = {}",
        dialect.quote_identifier(metadata.id_column_name()),
        dialect.literal(id)
    )
}
