use std::collections::HashSet;

use tracing::trace;

use super::{Entity, EntityColumn, EntityDescriptor};
use crate::core::{OrmError, Result};

/// Validated, immutable mapping of one entity type onto one table.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    type_name: String,
    table_name: String,
    columns: Vec<EntityColumn>,
    id_index: usize,
}

impl EntityMetadata {
    /// Builds metadata from a descriptor.
    ///
    /// Fails with [`OrmError::Mapping`] when the descriptor is not marked as
    /// an entity, when it does not declare exactly one identifier, or when
    /// two fields map to the same column.
    pub fn new(descriptor: &EntityDescriptor) -> Result<Self> {
        let type_name = descriptor.simple_name().to_string();

        if !descriptor.entity {
            return Err(OrmError::mapping(format!(
                "`{}` is not marked as an entity",
                type_name
            )));
        }

        let table_name = descriptor
            .table_name
            .as_ref()
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| type_name.clone());

        let columns: Vec<EntityColumn> = descriptor
            .fields
            .iter()
            .filter(|field| !field.transient)
            .map(EntityColumn::new)
            .collect();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.column_name().to_ascii_lowercase()) {
                return Err(OrmError::mapping(format!(
                    "`{}` maps column '{}' more than once",
                    type_name,
                    column.column_name()
                )));
            }
        }

        let id_indexes: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_id())
            .map(|(idx, _)| idx)
            .collect();

        let id_index = match id_indexes.as_slice() {
            [idx] => *idx,
            [] => {
                return Err(OrmError::mapping(format!(
                    "`{}` has no identifier field",
                    type_name
                )));
            }
            _ => {
                return Err(OrmError::mapping(format!(
                    "`{}` declares {} identifier fields, expected exactly one",
                    type_name,
                    id_indexes.len()
                )));
            }
        };

        trace!(
            entity = %type_name,
            table = %table_name,
            columns = columns.len(),
            "built entity metadata"
        );

        Ok(Self {
            type_name,
            table_name,
            columns,
            id_index,
        })
    }

    /// Builds metadata for `T` without going through the cache.
    pub fn of<T: Entity>() -> Result<Self> {
        Self::new(&T::descriptor())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn id_column(&self) -> &EntityColumn {
        &self.columns[self.id_index]
    }

    pub fn id_column_name(&self) -> &str {
        self.id_column().column_name()
    }

    pub fn columns(&self) -> &[EntityColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(EntityColumn::column_name).collect()
    }

    pub fn column_field_names(&self) -> Vec<&str> {
        self.columns.iter().map(EntityColumn::field_name).collect()
    }

    pub fn insertable_columns(&self) -> Vec<&EntityColumn> {
        self.columns.iter().filter(|c| c.is_insertable()).collect()
    }

    pub fn insertable_column_names(&self) -> Vec<&str> {
        self.insertable_columns()
            .into_iter()
            .map(EntityColumn::column_name)
            .collect()
    }

    pub fn non_id_columns(&self) -> Vec<&EntityColumn> {
        self.columns.iter().filter(|c| !c.is_id()).collect()
    }

    pub fn column_by_field_name(&self, field_name: &str) -> Option<&EntityColumn> {
        self.columns.iter().find(|c| c.field_name() == field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{FieldDescriptor, FieldType};

    fn with_id() -> EntityDescriptor {
        EntityDescriptor::new("WithId")
            .entity()
            .field(FieldDescriptor::new("id", FieldType::BigInt).id())
    }

    fn with_column() -> EntityDescriptor {
        EntityDescriptor::new("WithColumn")
            .entity()
            .field(FieldDescriptor::new("id", FieldType::BigInt).id())
            .field(FieldDescriptor::new("column", FieldType::Text).column("test_column"))
            .field(FieldDescriptor::new("notNullColumn", FieldType::Text).nullable(false))
            .field(FieldDescriptor::new("cached", FieldType::Text).transient())
    }

    fn with_column_non_insertable() -> EntityDescriptor {
        EntityDescriptor::new("WithColumnNonInsertable")
            .entity()
            .field(FieldDescriptor::new("id", FieldType::BigInt).id().generated())
            .field(FieldDescriptor::new("notInsertableColumn", FieldType::Text).insertable(false))
            .field(FieldDescriptor::new("insertableColumn", FieldType::Text))
    }

    #[test]
    fn test_table_name_defaults_to_type_name() {
        let metadata = EntityMetadata::new(&with_id()).unwrap();
        assert_eq!(metadata.table_name(), "WithId");
        assert_eq!(metadata.id_column_name(), "id");
    }

    #[test]
    fn test_table_override() {
        let metadata = EntityMetadata::new(&with_id().table("test_table")).unwrap();
        assert_eq!(metadata.table_name(), "test_table");
        assert_eq!(metadata.id_column_name(), "id");
    }

    #[test]
    fn test_missing_entity_marker_fails() {
        let descriptor = EntityDescriptor::new("WithoutEntity")
            .field(FieldDescriptor::new("id", FieldType::BigInt).id());

        let err = EntityMetadata::new(&descriptor).unwrap_err();
        assert!(err.is_mapping());
        assert!(err.to_string().contains("WithoutEntity"));
    }

    #[test]
    fn test_missing_id_fails() {
        let descriptor = EntityDescriptor::new("WithoutId")
            .entity()
            .field(FieldDescriptor::new("name", FieldType::Text));

        assert!(EntityMetadata::new(&descriptor).unwrap_err().is_mapping());
    }

    #[test]
    fn test_two_ids_fail() {
        let descriptor = with_id().field(FieldDescriptor::new("other", FieldType::BigInt).id());
        assert!(EntityMetadata::new(&descriptor).unwrap_err().is_mapping());
    }

    #[test]
    fn test_transient_id_does_not_count() {
        let descriptor = EntityDescriptor::new("TransientId")
            .entity()
            .field(FieldDescriptor::new("id", FieldType::BigInt).id().transient());
        assert!(EntityMetadata::new(&descriptor).is_err());
    }

    #[test]
    fn test_duplicate_column_fails() {
        let descriptor = with_id().field(FieldDescriptor::new("other", FieldType::Text).column("ID"));
        assert!(EntityMetadata::new(&descriptor).unwrap_err().is_mapping());
    }

    #[test]
    fn test_column_names_follow_declaration_order() {
        let metadata = EntityMetadata::new(&with_column()).unwrap();
        assert_eq!(metadata.table_name(), "WithColumn");
        assert_eq!(
            metadata.column_names(),
            vec!["id", "test_column", "notNullColumn"]
        );
        assert_eq!(
            metadata.column_field_names(),
            vec!["id", "column", "notNullColumn"]
        );
    }

    #[test]
    fn test_id_column_equals_column_built_from_same_field() {
        let descriptor = with_id();
        let metadata = EntityMetadata::new(&descriptor).unwrap();
        let id_column = EntityColumn::new(&descriptor.fields[0]);

        assert_eq!(metadata.id_column(), &id_column);
    }

    #[test]
    fn test_insertable_columns() {
        let descriptor = with_column_non_insertable();
        let metadata = EntityMetadata::new(&descriptor).unwrap();
        let insertable = EntityColumn::new(&descriptor.fields[2]);

        assert_eq!(metadata.table_name(), "WithColumnNonInsertable");
        assert_eq!(metadata.insertable_column_names(), vec!["insertableColumn"]);
        assert_eq!(metadata.insertable_columns(), vec![&insertable]);
    }

    #[test]
    fn test_non_id_columns() {
        let metadata = EntityMetadata::new(&with_column()).unwrap();
        let names: Vec<_> = metadata
            .non_id_columns()
            .into_iter()
            .map(EntityColumn::column_name)
            .collect();
        assert_eq!(names, vec!["test_column", "notNullColumn"]);
        assert!(metadata.column_by_field_name("column").is_some());
        assert!(metadata.column_by_field_name("cached").is_none());
    }
}
