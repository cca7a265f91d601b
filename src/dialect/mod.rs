//! SQL flavours. A dialect is picked once and passed explicitly to every
//! query builder.

mod h2;
mod mysql;
mod postgres;

pub use h2::H2Dialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::Value;
use crate::mapping::FieldType;

lazy_static! {
    static ref PLAIN_IDENTIFIER: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid");
}

/// Words every supported dialect refuses as bare identifiers.
const COMMON_RESERVED: &[&str] = &[
    "all", "and", "as", "by", "create", "delete", "distinct", "drop", "from", "group", "insert",
    "into", "join", "not", "null", "or", "order", "primary", "select", "set", "table", "update",
    "values", "where",
];

pub trait Dialect: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// SQL type of a column holding `field_type`. `length` only applies to
    /// text columns.
    fn column_type(&self, field_type: FieldType, length: Option<u32>) -> String;

    /// Extra clause for database-generated identifier columns.
    fn id_column_clause(&self) -> Option<&'static str>;

    fn quote_char(&self) -> char {
        '"'
    }

    /// Dialect-specific reserved words, on top of the common set.
    fn reserved_words(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_reserved(&self, ident: &str) -> bool {
        let lower = ident.to_ascii_lowercase();
        COMMON_RESERVED.contains(&lower.as_str()) || self.reserved_words().contains(&lower.as_str())
    }

    /// Leaves plain, non-reserved identifiers bare; quotes everything else.
    fn quote_identifier(&self, ident: &str) -> String {
        if PLAIN_IDENTIFIER.is_match(ident) && !self.is_reserved(ident) {
            return ident.to_string();
        }
        let quote = self.quote_char();
        let escaped = ident.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    /// Renders a value as an inline SQL literal.
    ///
    /// Nothing is parameterised: callers must not feed untrusted input to
    /// the builders that use this.
    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Boolean(b) => self.boolean_literal(*b).to_string(),
        }
    }
}

/// Default VARCHAR length when a text column declares none.
pub(crate) const DEFAULT_VARCHAR_LENGTH: u32 = 255;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_stay_bare() {
        let dialect = H2Dialect;
        assert_eq!(dialect.quote_identifier("users"), "users");
        assert_eq!(dialect.quote_identifier("test_column"), "test_column");
    }

    #[test]
    fn test_reserved_and_odd_identifiers_are_quoted() {
        let dialect = H2Dialect;
        assert_eq!(dialect.quote_identifier("order"), "\"order\"");
        assert_eq!(dialect.quote_identifier("first name"), "\"first name\"");
        assert_eq!(dialect.quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_literals() {
        let dialect = H2Dialect;
        assert_eq!(dialect.literal(&Value::Null), "NULL");
        assert_eq!(dialect.literal(&Value::Integer(20)), "20");
        assert_eq!(dialect.literal(&Value::Float(2.0)), "2.0");
        assert_eq!(dialect.literal(&Value::Float(2.5)), "2.5");
        assert_eq!(dialect.literal(&Value::Text("it's".into())), "'it''s'");
        assert_eq!(dialect.literal(&Value::Boolean(true)), "TRUE");
    }
}
