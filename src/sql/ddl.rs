use crate::dialect::Dialect;
use crate::mapping::{EntityColumn, EntityMetadata};

pub struct CreateQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> CreateQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    pub fn create_table(&self) -> String {
        format!(
            "CREATE TABLE {} ({})",
            self.dialect.quote_identifier(self.metadata.table_name()),
            self.column_definitions()
        )
    }

    pub fn create_table_if_not_exists(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.dialect.quote_identifier(self.metadata.table_name()),
            self.column_definitions()
        )
    }

    fn column_definitions(&self) -> String {
        self.metadata
            .columns()
            .iter()
            .map(|column| self.column_definition(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn column_definition(&self, column: &EntityColumn) -> String {
        let mut definition = format!(
            "{} {}",
            self.dialect.quote_identifier(column.column_name()),
            self.dialect.column_type(column.field_type(), column.length())
        );

        if column.is_id() {
            if column.is_generated()
                && let Some(clause) = self.dialect.id_column_clause()
            {
                definition.push(' ');
                definition.push_str(clause);
            }
            definition.push_str(" PRIMARY KEY");
        } else if !column.is_nullable() {
            definition.push_str(" NOT NULL");
        }

        definition
    }
}

pub struct DropQueryBuilder<'a> {
    metadata: &'a EntityMetadata,
    dialect: &'a dyn Dialect,
}

impl<'a> DropQueryBuilder<'a> {
    pub fn new(metadata: &'a EntityMetadata, dialect: &'a dyn Dialect) -> Self {
        Self { metadata, dialect }
    }

    pub fn drop_table(&self) -> String {
        format!(
            "DROP TABLE {}",
            self.dialect.quote_identifier(self.metadata.table_name())
        )
    }

    pub fn drop_table_if_exists(&self) -> String {
        format!(
            "DROP TABLE IF EXISTS {}",
            self.dialect.quote_identifier(self.metadata.table_name())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{H2Dialect, MySqlDialect, PostgresDialect};
    use crate::mapping::Entity;
    use crate::sql::fixtures::Person;

    #[test]
    fn test_create_table_h2() {
        let metadata = Person::metadata().unwrap();
        let sql = CreateQueryBuilder::new(&metadata, &H2Dialect).create_table();

        assert_eq!(
            sql,
            "CREATE TABLE users (id BIGINT AUTO_INCREMENT PRIMARY KEY, \
             nick_name VARCHAR(255) NOT NULL, old INT, email VARCHAR(255) NOT NULL)"
        );
    }

    #[test]
    fn test_create_table_postgres_identity() {
        let metadata = Person::metadata().unwrap();
        let sql = CreateQueryBuilder::new(&metadata, &PostgresDialect).create_table_if_not_exists();

        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS users (id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, \
             nick_name TEXT NOT NULL, old INTEGER, email TEXT NOT NULL)"
        );
    }

    #[test]
    fn test_transient_field_has_no_column() {
        let metadata = Person::metadata().unwrap();
        let sql = CreateQueryBuilder::new(&metadata, &MySqlDialect).create_table();
        assert!(!sql.contains("index"));
    }

    #[test]
    fn test_drop_table() {
        let metadata = Person::metadata().unwrap();
        let builder = DropQueryBuilder::new(&metadata, &H2Dialect);

        assert_eq!(builder.drop_table(), "DROP TABLE users");
        assert_eq!(builder.drop_table_if_exists(), "DROP TABLE IF EXISTS users");
    }
}
