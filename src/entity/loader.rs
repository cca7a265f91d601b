use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::{OrmError, Result, Value};
use crate::dialect::Dialect;
use crate::mapping::{Entity, EntityMetadata};
use crate::sql::{FindAllQueryBuilder, FindByIdQueryBuilder};
use crate::template::{EntityRowMapper, SqlTemplate};

/// Runs SELECTs for one entity type and rebuilds instances from the rows.
pub struct EntityLoader<T: Entity> {
    template: SqlTemplate,
    dialect: Arc<dyn Dialect>,
    metadata: Arc<EntityMetadata>,
    mapper: EntityRowMapper<T>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityLoader<T> {
    pub fn new(template: SqlTemplate, dialect: Arc<dyn Dialect>) -> Result<Self> {
        Ok(Self {
            template,
            dialect,
            metadata: T::metadata()?,
            mapper: EntityRowMapper::new(),
            _entity: PhantomData,
        })
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    /// Fails with `NotFound` when no row carries `id`.
    pub fn find_by_id(&self, id: impl Into<Value>) -> Result<T> {
        let id = id.into();
        let sql = FindByIdQueryBuilder::new(&self.metadata, self.dialect.as_ref()).find_by_id(&id);

        self.template
            .query_for_object(&sql, &self.mapper)
            .map_err(|err| match err {
                OrmError::NotFound(_) => OrmError::NotFound(format!(
                    "no row in '{}' with {} = {}",
                    self.metadata.table_name(),
                    self.metadata.id_column_name(),
                    id
                )),
                other => other,
            })
    }

    pub fn find_all(&self) -> Result<Vec<T>> {
        let sql = FindAllQueryBuilder::new(&self.metadata, self.dialect.as_ref()).find_all();
        self.template.query_for_list(&sql, &self.mapper)
    }
}
