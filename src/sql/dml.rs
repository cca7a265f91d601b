use super::{column_list, column_value, id_predicate, id_value};
use crate::core::{OrmError, Result, Value};
use crate::dialect::Dialect;
use crate::mapping::{Entity, EntityMetadata};

pub struct InsertQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> InsertQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    /// `INSERT INTO <table> (<insertable columns>) VALUES (<literals>)`
    pub fn insert<T: Entity>(&self, entity: &T) -> Result<String> {
        let columns = self.metadata.insertable_columns();
        if columns.is_empty() {
            return Err(OrmError::mapping(format!(
                "`{}` has no insertable columns",
                self.metadata.type_name()
            )));
        }

        let values = columns
            .iter()
            .map(|column| {
                column_value(self.metadata, entity, column).map(|value| self.dialect.literal(&value))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.dialect.quote_identifier(self.metadata.table_name()),
            column_list(self.dialect, columns.iter().copied()),
            values.join(", ")
        ))
    }
}

pub struct UpdateQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> UpdateQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    /// Sets every non-id column to the instance's current value and
    /// addresses the row by identifier.
    pub fn update<T: Entity>(&self, entity: &T) -> Result<String> {
        let columns = self.metadata.non_id_columns();
        if columns.is_empty() {
            return Err(OrmError::mapping(format!(
                "`{}` has no columns to update",
                self.metadata.type_name()
            )));
        }

        let assignments = columns
            .iter()
            .map(|column| {
                column_value(self.metadata, entity, column).map(|value| {
                    format!(
                        "{} = {}",
                        self.dialect.quote_identifier(column.column_name()),
                        self.dialect.literal(&value)
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let id = id_value(self.metadata, entity)?;

        Ok(format!(
            "UPDATE {} SET {} WHERE {}",
            self.dialect.quote_identifier(self.metadata.table_name()),
            assignments.join(", "),
            id_predicate(self.metadata, self.dialect, &id)
        ))
    }
}

pub struct DeleteQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> DeleteQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    pub fn delete<T: Entity>(&self, entity: &T) -> Result<String> {
        let id = id_value(self.metadata, entity)?;
        Ok(self.delete_by_id(&id))
    }

    pub fn delete_by_id(&self, id: &Value) -> String {
        format!(
            "delete FROM {} where {}",
            self.dialect.quote_identifier(self.metadata.table_name()),
            id_predicate(self.metadata, self.dialect, id)
        )
    }
}
