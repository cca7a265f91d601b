use std::cmp::Ordering;

use crate::core::{DbError, DbResult, Row, Schema, Value};
use crate::parser::ast::{BinaryOp, Expr};

/// Evaluates `expr` against one row. Comparisons involving NULL yield NULL.
pub fn evaluate(expr: &Expr, row: &Row, schema: &Schema, table_name: &str) -> DbResult<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Column(name) => {
            let idx = schema
                .find_column_index(name)
                .ok_or_else(|| DbError::ColumnNotFound(name.clone(), table_name.to_string()))?;
            Ok(row[idx].clone())
        }
        Expr::IsNull { expr, negated } => {
            let is_null = evaluate(expr, row, schema, table_name)?.is_null();
            Ok(Value::Boolean(is_null != *negated))
        }
        Expr::Not(inner) => match evaluate(inner, row, schema, table_name)? {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            Value::Null => Ok(Value::Null),
            other => Err(DbError::TypeMismatch(format!(
                "NOT expects BOOLEAN, got {}",
                other.type_name()
            ))),
        },
        Expr::BinaryOp { left, op, right } => {
            let left = evaluate(left, row, schema, table_name)?;
            let right = evaluate(right, row, schema, table_name)?;
            match op {
                BinaryOp::And => logical(left, right, true),
                BinaryOp::Or => logical(left, right, false),
                _ => comparison(&left, *op, &right),
            }
        }
    }
}

/// Row filter: only a TRUE predicate keeps the row.
pub fn matches(selection: Option<&Expr>, row: &Row, schema: &Schema, table_name: &str) -> DbResult<bool> {
    match selection {
        None => Ok(true),
        Some(expr) => Ok(matches!(
            evaluate(expr, row, schema, table_name)?,
            Value::Boolean(true)
        )),
    }
}

fn logical(left: Value, right: Value, is_and: bool) -> DbResult<Value> {
    let as_tristate = |value: Value| match value {
        Value::Boolean(b) => Ok(Some(b)),
        Value::Null => Ok(None),
        other => Err(DbError::TypeMismatch(format!(
            "Logical operator expects BOOLEAN, got {}",
            other.type_name()
        ))),
    };

    let result = match (as_tristate(left)?, as_tristate(right)?, is_and) {
        (Some(false), _, true) | (_, Some(false), true) => Some(false),
        (Some(true), Some(true), true) => Some(true),
        (Some(true), _, false) | (_, Some(true), false) => Some(true),
        (Some(false), Some(false), false) => Some(false),
        _ => None,
    };

    Ok(result.map(Value::Boolean).unwrap_or(Value::Null))
}

fn comparison(left: &Value, op: BinaryOp, right: &Value) -> DbResult<Value> {
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    let ordering = compare(left, right)?;
    let result = match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        BinaryOp::And | BinaryOp::Or => unreachable!("logical operators are handled separately"),
    };
    Ok(Value::Boolean(result))
}

fn compare(left: &Value, right: &Value) -> DbResult<Ordering> {
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            a.as_f64().zip(b.as_f64()).and_then(|(a, b)| a.partial_cmp(&b))
        }
        _ => None,
    };

    ordering.ok_or_else(|| {
        DbError::TypeMismatch(format!(
            "Cannot compare incompatible types: {} and {}",
            left.type_name(),
            right.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataType};

    fn eq(column: &str, value: Value) -> Expr {
        Expr::BinaryOp {
            left: Box::new(Expr::Column(column.into())),
            op: BinaryOp::Eq,
            right: Box::new(Expr::Literal(value)),
        }
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Column::new("id", DataType::Integer),
            Column::new("email", DataType::Text),
        ])
    }

    #[test]
    fn test_equality_filter() {
        let row = vec![Value::Integer(1), Value::Text("a@b.c".into())];
        assert!(matches(Some(&eq("ID", Value::Integer(1))), &row, &schema(), "t").unwrap());
        assert!(!matches(Some(&eq("id", Value::Integer(2))), &row, &schema(), "t").unwrap());
    }

    #[test]
    fn test_null_comparison_filters_out() {
        let row = vec![Value::Integer(1), Value::Null];
        assert!(!matches(Some(&eq("email", Value::Text("x".into()))), &row, &schema(), "t").unwrap());
    }

    #[test]
    fn test_and_short_circuits_on_false() {
        let row = vec![Value::Integer(1), Value::Null];
        let expr = Expr::BinaryOp {
            left: Box::new(eq("id", Value::Integer(2))),
            op: BinaryOp::And,
            right: Box::new(eq("email", Value::Text("x".into()))),
        };
        assert_eq!(evaluate(&expr, &row, &schema(), "t").unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_unknown_column() {
        let row = vec![Value::Integer(1), Value::Null];
        let err = evaluate(&Expr::Column("age".into()), &row, &schema(), "t").unwrap_err();
        assert_eq!(err, DbError::ColumnNotFound("age".into(), "t".into()));
    }

    #[test]
    fn test_incompatible_comparison() {
        let row = vec![Value::Integer(1), Value::Null];
        assert!(evaluate(&eq("id", Value::Text("1".into())), &row, &schema(), "t").is_err());
    }
}
