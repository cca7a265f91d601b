use super::{DEFAULT_VARCHAR_LENGTH, Dialect};
use crate::mapping::FieldType;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn column_type(&self, field_type: FieldType, length: Option<u32>) -> String {
        match field_type {
            FieldType::Integer => "INT".to_string(),
            FieldType::BigInt => "BIGINT".to_string(),
            FieldType::Float => "FLOAT".to_string(),
            FieldType::Double => "DOUBLE".to_string(),
            FieldType::Text => {
                format!("VARCHAR({})", length.unwrap_or(DEFAULT_VARCHAR_LENGTH))
            }
            FieldType::Boolean => "TINYINT(1)".to_string(),
        }
    }

    fn id_column_clause(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &["key", "limit", "offset", "index"]
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}
