use super::{FieldDescriptor, FieldType};

/// One mapped field of an entity, with every default resolved.
///
/// Two columns are equal when they were built from the same field
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityColumn {
    column_name: String,
    field_name: String,
    field_type: FieldType,
    id: bool,
    generated: bool,
    insertable: bool,
    nullable: bool,
    length: Option<u32>,
}

impl EntityColumn {
    pub fn new(field: &FieldDescriptor) -> Self {
        let column_name = field
            .column_name
            .as_ref()
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| field.name.clone());

        // A database-assigned identifier never appears in INSERT.
        let insertable = !(field.id && field.generated) && field.insertable.unwrap_or(true);
        let nullable = !field.id && field.nullable.unwrap_or(true);

        Self {
            column_name,
            field_name: field.name.clone(),
            field_type: field.field_type,
            id: field.id,
            generated: field.id && field.generated,
            insertable,
            nullable,
            length: field.length,
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_id(&self) -> bool {
        self.id
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn is_insertable(&self) -> bool {
        self.insertable
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let column = EntityColumn::new(&FieldDescriptor::new("email", FieldType::Text));

        assert_eq!(column.column_name(), "email");
        assert_eq!(column.field_name(), "email");
        assert!(column.is_insertable());
        assert!(column.is_nullable());
        assert!(!column.is_id());
    }

    #[test]
    fn test_overrides() {
        let column = EntityColumn::new(
            &FieldDescriptor::new("name", FieldType::Text)
                .column("nick_name")
                .insertable(false)
                .nullable(false)
                .length(64),
        );

        assert_eq!(column.column_name(), "nick_name");
        assert!(!column.is_insertable());
        assert!(!column.is_nullable());
        assert_eq!(column.length(), Some(64));
    }

    #[test]
    fn test_id_is_never_nullable() {
        let column = EntityColumn::new(&FieldDescriptor::new("id", FieldType::BigInt).id().nullable(true));
        assert!(!column.is_nullable());
        assert!(column.is_insertable());
    }

    #[test]
    fn test_generated_id_is_not_insertable() {
        let column = EntityColumn::new(&FieldDescriptor::new("id", FieldType::BigInt).id().generated());
        assert!(column.is_generated());
        assert!(!column.is_insertable());
    }

    #[test]
    fn test_generated_ignored_on_plain_field() {
        let column = EntityColumn::new(&FieldDescriptor::new("age", FieldType::Integer).generated());
        assert!(!column.is_generated());
        assert!(column.is_insertable());
    }
}
