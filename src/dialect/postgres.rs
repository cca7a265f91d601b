use super::Dialect;
use crate::mapping::FieldType;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn column_type(&self, field_type: FieldType, length: Option<u32>) -> String {
        match field_type {
            FieldType::Integer => "INTEGER".to_string(),
            FieldType::BigInt => "BIGINT".to_string(),
            FieldType::Float => "REAL".to_string(),
            FieldType::Double => "DOUBLE PRECISION".to_string(),
            FieldType::Text => match length {
                Some(length) => format!("VARCHAR({})", length),
                None => "TEXT".to_string(),
            },
            FieldType::Boolean => "BOOLEAN".to_string(),
        }
    }

    fn id_column_clause(&self) -> Option<&'static str> {
        Some("GENERATED BY DEFAULT AS IDENTITY")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &["user", "limit", "offset", "column", "check"]
    }
}
