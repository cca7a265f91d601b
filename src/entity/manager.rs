use std::sync::Arc;

use super::{EntityLoader, EntityPersister};
use crate::core::{Result, Value};
use crate::dialect::Dialect;
use crate::mapping::Entity;
use crate::template::SqlTemplate;

/// Entry point for application code.
pub trait EntityManager {
    fn find<T: Entity>(&self, id: impl Into<Value>) -> Result<T>;

    fn persist<T: Entity>(&self, entity: &T) -> Result<()>;

    fn remove<T: Entity>(&self, entity: &T) -> Result<()>;

    fn update<T: Entity>(&self, entity: &T) -> Result<()>;
}

/// Works with any entity type; metadata comes from the registry on each call.
#[derive(Debug, Clone)]
pub struct EntityManagerImpl {
    template: SqlTemplate,
    dialect: Arc<dyn Dialect>,
}

impl EntityManagerImpl {
    pub fn new(template: SqlTemplate, dialect: Arc<dyn Dialect>) -> Self {
        Self { template, dialect }
    }

    pub fn template(&self) -> &SqlTemplate {
        &self.template
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn find_all<T: Entity>(&self) -> Result<Vec<T>> {
        self.loader::<T>()?.find_all()
    }

    fn loader<T: Entity>(&self) -> Result<EntityLoader<T>> {
        EntityLoader::new(self.template.clone(), self.dialect.clone())
    }

    fn persister<T: Entity>(&self) -> Result<EntityPersister<T>> {
        EntityPersister::new(self.template.clone(), self.dialect.clone())
    }
}

impl EntityManager for EntityManagerImpl {
    fn find<T: Entity>(&self, id: impl Into<Value>) -> Result<T> {
        self.loader::<T>()?.find_by_id(id)
    }

    fn persist<T: Entity>(&self, entity: &T) -> Result<()> {
        self.persister::<T>()?.insert(entity)
    }

    fn remove<T: Entity>(&self, entity: &T) -> Result<()> {
        self.persister::<T>()?.delete(entity)
    }

    fn update<T: Entity>(&self, entity: &T) -> Result<()> {
        self.persister::<T>()?.update(entity)
    }
}

/// Manager bound to a single entity type.
pub struct SimpleEntityManager<T: Entity> {
    persister: EntityPersister<T>,
    loader: EntityLoader<T>,
}

impl<T: Entity> SimpleEntityManager<T> {
    pub fn new(template: SqlTemplate, dialect: Arc<dyn Dialect>) -> Result<Self> {
        Ok(Self {
            persister: EntityPersister::new(template.clone(), dialect.clone())?,
            loader: EntityLoader::new(template, dialect)?,
        })
    }

    pub fn find(&self, id: impl Into<Value>) -> Result<T> {
        self.loader.find_by_id(id)
    }

    pub fn find_all(&self) -> Result<Vec<T>> {
        self.loader.find_all()
    }

    pub fn persist(&self, entity: &T) -> Result<()> {
        self.persister.insert(entity)
    }

    pub fn remove(&self, entity: &T) -> Result<()> {
        self.persister.delete(entity)
    }

    pub fn update(&self, entity: &T) -> Result<()> {
        self.persister.update(entity)
    }
}
