use super::{DEFAULT_VARCHAR_LENGTH, Dialect};
use crate::mapping::FieldType;

/// H2-compatible SQL. This is also what [`InMemoryDB`](crate::InMemoryDB)
/// understands best.
#[derive(Debug, Clone, Copy, Default)]
pub struct H2Dialect;

impl Dialect for H2Dialect {
    fn name(&self) -> &'static str {
        "h2"
    }

    fn column_type(&self, field_type: FieldType, length: Option<u32>) -> String {
        match field_type {
            FieldType::Integer => "INT".to_string(),
            FieldType::BigInt => "BIGINT".to_string(),
            FieldType::Float => "REAL".to_string(),
            FieldType::Double => "DOUBLE".to_string(),
            FieldType::Text => {
                format!("VARCHAR({})", length.unwrap_or(DEFAULT_VARCHAR_LENGTH))
            }
            FieldType::Boolean => "BOOLEAN".to_string(),
        }
    }

    fn id_column_clause(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        &["user", "value", "limit", "offset"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mapping() {
        let dialect = H2Dialect;
        assert_eq!(dialect.column_type(FieldType::Integer, None), "INT");
        assert_eq!(dialect.column_type(FieldType::BigInt, None), "BIGINT");
        assert_eq!(dialect.column_type(FieldType::Text, None), "VARCHAR(255)");
        assert_eq!(dialect.column_type(FieldType::Text, Some(20)), "VARCHAR(20)");
    }

    #[test]
    fn test_user_is_reserved() {
        assert_eq!(H2Dialect.quote_identifier("user"), "\"user\"");
    }
}
