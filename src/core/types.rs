use super::{DataType, DbError, DbResult, Value};

pub type Row = Vec<Value>;

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            primary_key: false,
            auto_increment: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Primary key columns are implicitly NOT NULL.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Checks the value against the column and returns it coerced to the
    /// column's storage type.
    pub fn validate(&self, value: Value) -> DbResult<Value> {
        if value.is_null() {
            if !self.nullable {
                return Err(DbError::ConstraintViolation(format!(
                    "Column '{}' cannot be NULL",
                    self.name
                )));
            }
            return Ok(value);
        }

        if !self.data_type.is_compatible(&value) {
            return Err(DbError::TypeMismatch(format!(
                "Column '{}' expects type {}, got {}",
                self.name,
                self.data_type,
                value.type_name()
            )));
        }

        Ok(self.data_type.coerce(value))
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Identifiers are matched case-insensitively, the way unquoted SQL
    /// identifiers are.
    pub fn find_column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.name.eq_ignore_ascii_case(name))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    pub fn primary_key_index(&self) -> Option<usize> {
        self.columns.iter().position(|col| col.primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null_rejects_null() {
        let col = Column::new("name", DataType::Text).not_null();
        assert!(matches!(
            col.validate(Value::Null),
            Err(DbError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_float_column_coerces_integer() {
        let col = Column::new("score", DataType::Float);
        assert_eq!(col.validate(Value::Integer(3)).unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_column_lookup_ignores_case() {
        let schema = Schema::new(vec![
            Column::new("id", DataType::Integer).primary_key(),
            Column::new("Name", DataType::Text),
        ]);
        assert_eq!(schema.find_column_index("NAME"), Some(1));
        assert_eq!(schema.primary_key_index(), Some(0));
    }
}
