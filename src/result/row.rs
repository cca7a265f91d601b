use crate::core::{OrmError, Result, Value};
use crate::mapping::ColumnValue;

/// Borrowed view of one result row.
#[derive(Debug, Clone, Copy)]
pub struct ResultRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> ResultRow<'a> {
    pub fn new(columns: &'a [String], values: &'a [Value]) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw cell of `column`, matched case-insensitively.
    pub fn value(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|name| name.eq_ignore_ascii_case(column))
            .and_then(|idx| self.values.get(idx))
    }

    /// Cell of `column` converted to `T`.
    pub fn get<T: ColumnValue>(&self, column: &str) -> Result<T> {
        let value = self.value(column).ok_or_else(|| {
            OrmError::mapping(format!("column '{}' is missing from the result row", column))
        })?;

        T::from_value(value.clone()).map_err(|err| match err {
            OrmError::Mapping(message) => {
                OrmError::Mapping(format!("column '{}': {}", column, message))
            }
            other => other,
        })
    }
}
