use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Table, TableSchema};
use crate::core::{DbError, DbResult};

/// Catalog of tables. Names are matched case-insensitively.
pub struct InMemoryStorage {
    tables: RwLock<HashMap<String, Arc<RwLock<Table>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    pub fn create_table(&self, schema: TableSchema) -> DbResult<()> {
        let mut tables = self.tables.write()?;
        let key = Self::key(schema.name());

        if tables.contains_key(&key) {
            return Err(DbError::TableExists(schema.name().to_string()));
        }

        tables.insert(key, Arc::new(RwLock::new(Table::new(schema))));
        Ok(())
    }

    pub fn drop_table(&self, name: &str) -> DbResult<()> {
        let mut tables = self.tables.write()?;
        if tables.remove(&Self::key(name)).is_none() {
            return Err(DbError::TableNotFound(name.to_string()));
        }
        Ok(())
    }

    /// Handle on a table for concurrent access.
    pub fn get_table(&self, name: &str) -> DbResult<Arc<RwLock<Table>>> {
        self.tables
            .read()?
            .get(&Self::key(name))
            .cloned()
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables
            .read()
            .map(|tables| tables.contains_key(&Self::key(name)))
            .unwrap_or(false)
    }

    pub fn list_tables(&self) -> DbResult<Vec<String>> {
        let tables = self.tables.read()?;
        let mut names = tables
            .values()
            .map(|table| table.read().map(|t| t.schema().name().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}
