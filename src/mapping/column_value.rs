use std::fmt;

use crate::core::{OrmError, Result, Value};

/// Logical type of a mapped field. Dialects turn it into a concrete SQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    BigInt,
    Float,
    Double,
    Text,
    Boolean,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Text => "text",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Conversion between a Rust field type and a [`Value`] cell.
///
/// `#[derive(Entity)]` requires every non-transient field to implement this.
/// `Option<T>` maps to the same SQL type as `T` and round-trips `NULL`.
pub trait ColumnValue: Sized {
    fn field_type() -> FieldType;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self>;
}

fn conversion_error(value: &Value, target: &str) -> OrmError {
    OrmError::mapping(format!(
        "cannot convert {} value '{}' to {}",
        value.type_name(),
        value,
        target
    ))
}

impl ColumnValue for i64 {
    fn field_type() -> FieldType {
        FieldType::BigInt
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_i64().ok_or_else(|| conversion_error(&value, "i64"))
    }
}

impl ColumnValue for i32 {
    fn field_type() -> FieldType {
        FieldType::Integer
    }

    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| conversion_error(&value, "i32"))
    }
}

impl ColumnValue for u32 {
    fn field_type() -> FieldType {
        FieldType::BigInt
    }

    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_i64()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| conversion_error(&value, "u32"))
    }
}

impl ColumnValue for f64 {
    fn field_type() -> FieldType {
        FieldType::Double
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| conversion_error(&value, "f64"))
    }
}

impl ColumnValue for f32 {
    fn field_type() -> FieldType {
        FieldType::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| conversion_error(&value, "f32"))
    }
}

impl ColumnValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(conversion_error(&other, "String")),
        }
    }
}

impl ColumnValue for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(conversion_error(&other, "bool")),
        }
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_maps_to_inner_type() {
        assert_eq!(<Option<i64> as ColumnValue>::field_type(), FieldType::BigInt);
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert_eq!(None::<i32>.to_value(), Value::Null);
    }

    #[test]
    fn test_null_into_required_field_is_mapping_error() {
        let err = i64::from_value(Value::Null).unwrap_err();
        assert!(err.is_mapping());
    }

    #[test]
    fn test_i32_rejects_out_of_range() {
        assert!(i32::from_value(Value::Integer(i64::MAX)).is_err());
        assert_eq!(i32::from_value(Value::Integer(20)).unwrap(), 20);
    }

    #[test]
    fn test_text_into_integer_is_rejected() {
        let err = i64::from_value(Value::Text("twenty".into())).unwrap_err();
        assert!(err.to_string().contains("cannot convert TEXT"));
    }

    #[test]
    fn test_bool_accepts_numeric_flags() {
        assert!(bool::from_value(Value::Integer(1)).unwrap());
        assert!(!bool::from_value(Value::Boolean(false)).unwrap());
    }
}
