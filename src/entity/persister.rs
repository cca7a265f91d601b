use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

use crate::core::Result;
use crate::dialect::Dialect;
use crate::mapping::{Entity, EntityMetadata};
use crate::sql::{DeleteQueryBuilder, InsertQueryBuilder, UpdateQueryBuilder};
use crate::template::SqlTemplate;

/// Writes instances of one entity type. Each call runs one statement.
pub struct EntityPersister<T: Entity> {
    template: SqlTemplate,
    dialect: Arc<dyn Dialect>,
    metadata: Arc<EntityMetadata>,
    _entity: PhantomData<fn(&T)>,
}

impl<T: Entity> EntityPersister<T> {
    pub fn new(template: SqlTemplate, dialect: Arc<dyn Dialect>) -> Result<Self> {
        Ok(Self {
            template,
            dialect,
            metadata: T::metadata()?,
            _entity: PhantomData,
        })
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    pub fn insert(&self, entity: &T) -> Result<()> {
        let sql = InsertQueryBuilder::new(&self.metadata, self.dialect.as_ref()).insert(entity)?;
        self.template.execute(&sql)?;
        Ok(())
    }

    /// Succeeds even when no row matches.
    pub fn update(&self, entity: &T) -> Result<()> {
        let sql = UpdateQueryBuilder::new(&self.metadata, self.dialect.as_ref()).update(entity)?;
        let affected = self.template.execute(&sql)?;
        self.warn_if_untouched("update", affected);
        Ok(())
    }

    /// Succeeds even when no row matches, so deleting twice is harmless.
    pub fn delete(&self, entity: &T) -> Result<()> {
        let sql = DeleteQueryBuilder::new(&self.metadata, self.dialect.as_ref()).delete(entity)?;
        let affected = self.template.execute(&sql)?;
        self.warn_if_untouched("delete", affected);
        Ok(())
    }

    fn warn_if_untouched(&self, operation: &str, affected: usize) {
        if affected == 0 {
            warn!(
                table = %self.metadata.table_name(),
                operation,
                "statement affected no rows"
            );
        }
    }
}
