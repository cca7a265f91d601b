use super::{column_list, id_predicate};
use crate::core::Value;
use crate::dialect::Dialect;
use crate::mapping::EntityMetadata;

pub struct FindByIdQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> FindByIdQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    pub fn find_by_id(&self, id: &Value) -> String {
        format!(
            "SELECT {} FROM {} WHERE {}",
            column_list(self.dialect, self.metadata.columns()),
            self.dialect.quote_identifier(self.metadata.table_name()),
            id_predicate(self.metadata, self.dialect, id)
        )
    }
}

pub struct FindAllQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> FindAllQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    pub fn find_all(&self) -> String {
        format!(
            "SELECT {} FROM {}",
            column_list(self.dialect, self.metadata.columns()),
            self.dialect.quote_identifier(self.metadata.table_name())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{H2Dialect, MySqlDialect};
    use crate::mapping::Entity;
    use crate::sql::fixtures::Person;

    #[test]
    fn test_find_by_id() {
        let metadata = Person::metadata().unwrap();
        let sql = FindByIdQueryBuilder::new(&metadata, &H2Dialect).find_by_id(&Value::from(1i64));

        assert_eq!(
            sql,
            "SELECT id, nick_name, old, email FROM users WHERE id = 1"
        );
    }

    #[test]
    fn test_find_by_text_id_is_quoted() {
        let metadata = Person::metadata().unwrap();
        let sql = FindByIdQueryBuilder::new(&metadata, &MySqlDialect).find_by_id(&Value::from("a"));

        assert!(sql.ends_with("WHERE id = 'a'"));
    }

    #[test]
    fn test_find_all() {
        let metadata = Person::metadata().unwrap();
        let sql = FindAllQueryBuilder::new(&metadata, &H2Dialect).find_all();

        assert_eq!(sql, "SELECT id, nick_name, old, email FROM users");
    }
}
