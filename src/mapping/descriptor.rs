use super::FieldType;

/// Static mapping table for one field, as declared on the entity type.
///
/// `None` options mean "not declared": [`EntityColumn`](super::EntityColumn)
/// applies the defaults when metadata is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub id: bool,
    pub generated: bool,
    pub transient: bool,
    pub column_name: Option<String>,
    pub insertable: Option<bool>,
    pub nullable: Option<bool>,
    pub length: Option<u32>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            id: false,
            generated: false,
            transient: false,
            column_name: None,
            insertable: None,
            nullable: None,
            length: None,
        }
    }

    /// Marks the field as the identifier.
    pub fn id(mut self) -> Self {
        self.id = true;
        self
    }

    /// Identifier value is assigned by the database.
    pub fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Excludes the field from the mapping.
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    pub fn insertable(mut self, insertable: bool) -> Self {
        self.insertable = Some(insertable);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// Static mapping table for one entity type.
///
/// `#[derive(Entity)]` always marks the descriptor as an entity; hand-built
/// descriptors must call [`EntityDescriptor::entity`] or metadata
/// construction fails.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
    pub type_name: String,
    pub entity: bool,
    pub table_name: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            entity: false,
            table_name: None,
            fields: Vec::new(),
        }
    }

    pub fn entity(mut self) -> Self {
        self.entity = true;
        self
    }

    pub fn table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Type name without any module path.
    pub fn simple_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(self.type_name.as_str())
    }
}
