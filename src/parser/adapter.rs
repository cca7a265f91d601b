// ============================================================================
// src/parser/adapter.rs - sqlparser AST -> engine AST
// ============================================================================

use std::fmt::Display;

use sqlparser::ast as sql_ast;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::core::{DataType, DbError, DbResult, Value};
use crate::parser::ast::*;

/// Parses SQL with the generic dialect, which accepts the H2, PostgreSQL
/// and MySQL spellings the query builders produce (`AUTO_INCREMENT`,
/// `GENERATED ... AS IDENTITY`, backtick and double-quote identifiers).
pub struct SqlParserAdapter {
    dialect: GenericDialect,
}

impl SqlParserAdapter {
    pub fn new() -> Self {
        Self {
            dialect: GenericDialect {},
        }
    }

    pub fn parse(&self, sql: &str) -> DbResult<Vec<Statement>> {
        let external_stmts = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| DbError::ParseError(e.to_string()))?;

        external_stmts
            .into_iter()
            .map(|stmt| self.convert_statement(stmt))
            .collect()
    }

    fn convert_statement(&self, stmt: sql_ast::Statement) -> DbResult<Statement> {
        match stmt {
            sql_ast::Statement::CreateTable(create) => {
                Ok(Statement::CreateTable(self.convert_create_table(create)?))
            }
            sql_ast::Statement::Drop { object_type, names, if_exists, .. } => {
                if let sql_ast::ObjectType::Table = object_type {
                    Ok(Statement::DropTable(self.convert_drop_table(names, if_exists)?))
                } else {
                    Err(DbError::UnsupportedOperation(format!(
                        "Only DROP TABLE supported, got: {:?}",
                        object_type
                    )))
                }
            }
            sql_ast::Statement::Insert(insert) => Ok(Statement::Insert(self.convert_insert(insert)?)),
            sql_ast::Statement::Query(query) => Ok(Statement::Query(self.convert_query(*query)?)),
            sql_ast::Statement::Delete(delete) => Ok(Statement::Delete(self.convert_delete(delete)?)),
            sql_ast::Statement::Update { table, assignments, selection, .. } => {
                Ok(Statement::Update(self.convert_update(table, assignments, selection)?))
            }
            _ => Err(DbError::UnsupportedOperation(format!(
                "Statement type not supported: {}",
                stmt
            ))),
        }
    }

    fn convert_create_table(&self, create: sql_ast::CreateTable) -> DbResult<CreateTableStmt> {
        let table_name = extract_table_name(&create.name)?;
        let columns = create
            .columns
            .into_iter()
            .map(|col| self.convert_column_def(col))
            .collect::<DbResult<Vec<_>>>()?;

        if columns.iter().filter(|col| col.primary_key).count() > 1 {
            return Err(DbError::UnsupportedOperation(
                "Composite primary keys are not supported".into(),
            ));
        }

        Ok(CreateTableStmt {
            table_name,
            columns,
            if_not_exists: create.if_not_exists,
        })
    }

    fn convert_drop_table(&self, names: Vec<sql_ast::ObjectName>, if_exists: bool) -> DbResult<DropTableStmt> {
        if names.len() != 1 {
            return Err(DbError::UnsupportedOperation(
                "Only single table DROP supported".into(),
            ));
        }

        Ok(DropTableStmt {
            table_name: extract_table_name(&names[0])?,
            if_exists,
        })
    }

    fn convert_column_def(&self, col: sql_ast::ColumnDef) -> DbResult<ColumnDef> {
        let data_type = convert_data_type(&col.data_type)?;

        let mut nullable = true;
        let mut primary_key = false;
        let mut auto_increment = false;

        for def in &col.options {
            if matches!(def.option, sql_ast::ColumnOption::NotNull) {
                nullable = false;
                continue;
            }

            // Matched on the rendered option so that dialect-specific
            // spellings all land in the same place.
            let rendered = def.option.to_string().to_ascii_uppercase();
            if rendered.starts_with("PRIMARY KEY") {
                primary_key = true;
                nullable = false;
            } else if rendered.contains("AUTO_INCREMENT")
                || rendered.contains("AUTOINCREMENT")
                || rendered.starts_with("GENERATED")
            {
                auto_increment = true;
            }
        }

        Ok(ColumnDef {
            name: col.name.value,
            data_type,
            nullable,
            primary_key,
            auto_increment,
        })
    }

    fn convert_insert(&self, insert: sql_ast::Insert) -> DbResult<InsertStmt> {
        let table_name = unquote(&insert.table.to_string());

        let columns = if insert.columns.is_empty() {
            None
        } else {
            Some(insert.columns.into_iter().map(|id| id.value).collect())
        };

        let values = if let Some(source) = insert.source {
            if let sql_ast::SetExpr::Values(vals) = *source.body {
                vals.rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(convert_expr)
                            .collect::<DbResult<Vec<_>>>()
                    })
                    .collect::<DbResult<Vec<_>>>()?
            } else {
                return Err(DbError::UnsupportedOperation(
                    "Only VALUES clause supported".into(),
                ));
            }
        } else {
            Vec::new()
        };

        Ok(InsertStmt {
            table_name,
            columns,
            values,
        })
    }

    fn convert_update(
        &self,
        table: sql_ast::TableWithJoins,
        assignments: Vec<sql_ast::Assignment>,
        selection: Option<sql_ast::Expr>,
    ) -> DbResult<UpdateStmt> {
        let table_name = table_factor_name(&table.relation, "UPDATE")?;

        let assignments = assignments
            .into_iter()
            .map(|assign| {
                let column = match assign.target {
                    sql_ast::AssignmentTarget::ColumnName(col_name) => {
                        if col_name.0.len() == 1 {
                            unquote(&col_name.0[0].to_string())
                        } else {
                            return Err(DbError::UnsupportedOperation(
                                "Qualified column names not supported in UPDATE".into(),
                            ));
                        }
                    }
                    _ => {
                        return Err(DbError::UnsupportedOperation(
                            "Only simple column names supported in UPDATE".into(),
                        ));
                    }
                };

                Ok(Assignment {
                    column,
                    value: convert_expr(assign.value)?,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        Ok(UpdateStmt {
            table_name,
            assignments,
            selection: selection.map(convert_expr).transpose()?,
        })
    }

    fn convert_delete(&self, delete: sql_ast::Delete) -> DbResult<DeleteStmt> {
        let tables = match delete.from {
            sql_ast::FromTable::WithFromKeyword(tables) => tables,
            sql_ast::FromTable::WithoutKeyword(tables) => tables,
        };

        let Some(first) = tables.first() else {
            return Err(DbError::ParseError("DELETE requires a table".into()));
        };

        Ok(DeleteStmt {
            table_name: table_factor_name(&first.relation, "DELETE")?,
            selection: delete.selection.map(convert_expr).transpose()?,
        })
    }

    fn convert_query(&self, query: sql_ast::Query) -> DbResult<QueryStmt> {
        let sql_ast::SetExpr::Select(select) = *query.body else {
            return Err(DbError::UnsupportedOperation(
                "Only SELECT queries supported".into(),
            ));
        };

        if select.from.len() != 1 || !select.from[0].joins.is_empty() {
            return Err(DbError::UnsupportedOperation(
                "SELECT must read from exactly one table".into(),
            ));
        }

        let table_name = table_factor_name(&select.from[0].relation, "SELECT")?;

        let projection = select
            .projection
            .into_iter()
            .map(|item| match item {
                sql_ast::SelectItem::Wildcard(_) => Ok(SelectItem::Wildcard),
                sql_ast::SelectItem::UnnamedExpr(sql_ast::Expr::Identifier(ident)) => {
                    Ok(SelectItem::Column(ident.value))
                }
                sql_ast::SelectItem::UnnamedExpr(sql_ast::Expr::CompoundIdentifier(parts)) => parts
                    .last()
                    .map(|ident| SelectItem::Column(ident.value.clone()))
                    .ok_or_else(|| DbError::ParseError("Empty column reference".into())),
                other => Err(DbError::UnsupportedOperation(format!(
                    "Unsupported select item: {}",
                    other
                ))),
            })
            .collect::<DbResult<Vec<_>>>()?;

        Ok(QueryStmt {
            projection,
            table_name,
            selection: select.selection.map(convert_expr).transpose()?,
        })
    }
}

impl Default for SqlParserAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_data_type(dt: &sql_ast::DataType) -> DbResult<DataType> {
    match dt {
        sql_ast::DataType::Int(_)
        | sql_ast::DataType::Integer(_)
        | sql_ast::DataType::BigInt(_) => Ok(DataType::Integer),

        sql_ast::DataType::Float(_)
        | sql_ast::DataType::Double(_)
        | sql_ast::DataType::Real => Ok(DataType::Float),

        sql_ast::DataType::Text
        | sql_ast::DataType::Varchar(_)
        | sql_ast::DataType::Char(_)
        | sql_ast::DataType::String(_) => Ok(DataType::Text),

        sql_ast::DataType::Boolean | sql_ast::DataType::Bool => Ok(DataType::Boolean),

        other => {
            let rendered = other.to_string().to_ascii_uppercase();
            if rendered.starts_with("SMALLINT") || rendered.starts_with("TINYINT") {
                Ok(DataType::Integer)
            } else if rendered.starts_with("DOUBLE") {
                Ok(DataType::Float)
            } else if rendered.starts_with("CHARACTER VARYING") {
                Ok(DataType::Text)
            } else {
                Err(DbError::TypeMismatch(format!(
                    "Unsupported data type: {}",
                    rendered
                )))
            }
        }
    }
}

fn convert_expr(expr: sql_ast::Expr) -> DbResult<Expr> {
    match expr {
        sql_ast::Expr::Identifier(ident) => Ok(Expr::Column(ident.value)),
        sql_ast::Expr::CompoundIdentifier(parts) => parts
            .last()
            .map(|ident| Expr::Column(ident.value.clone()))
            .ok_or_else(|| DbError::ParseError("Empty column reference".into())),
        sql_ast::Expr::Value(value_with_span) => Ok(Expr::Literal(convert_value(&value_with_span.value)?)),
        sql_ast::Expr::Nested(inner) => convert_expr(*inner),
        sql_ast::Expr::IsNull(inner) => Ok(Expr::IsNull {
            expr: Box::new(convert_expr(*inner)?),
            negated: false,
        }),
        sql_ast::Expr::IsNotNull(inner) => Ok(Expr::IsNull {
            expr: Box::new(convert_expr(*inner)?),
            negated: true,
        }),
        sql_ast::Expr::UnaryOp { op, expr } => match op {
            sql_ast::UnaryOperator::Not => Ok(Expr::Not(Box::new(convert_expr(*expr)?))),
            sql_ast::UnaryOperator::Minus => {
                // i64::MIN has no positive counterpart, so parse sign and digits together.
                if let sql_ast::Expr::Value(literal) = expr.as_ref()
                    && let sql_ast::Value::Number(n, _) = &literal.value
                    && let Ok(i) = format!("-{n}").parse::<i64>()
                {
                    return Ok(Expr::Literal(Value::Integer(i)));
                }

                match convert_expr(*expr)? {
                    Expr::Literal(Value::Integer(i)) => Ok(Expr::Literal(Value::Integer(-i))),
                    Expr::Literal(Value::Float(f)) => Ok(Expr::Literal(Value::Float(-f))),
                    other => Err(DbError::UnsupportedOperation(format!(
                        "Cannot negate {:?}",
                        other
                    ))),
                }
            }
            sql_ast::UnaryOperator::Plus => convert_expr(*expr),
            other => Err(DbError::UnsupportedOperation(format!(
                "Unsupported unary operator: {}",
                other
            ))),
        },
        sql_ast::Expr::BinaryOp { left, op, right } => {
            let op = match op {
                sql_ast::BinaryOperator::Eq => BinaryOp::Eq,
                sql_ast::BinaryOperator::NotEq => BinaryOp::NotEq,
                sql_ast::BinaryOperator::Lt => BinaryOp::Lt,
                sql_ast::BinaryOperator::LtEq => BinaryOp::LtEq,
                sql_ast::BinaryOperator::Gt => BinaryOp::Gt,
                sql_ast::BinaryOperator::GtEq => BinaryOp::GtEq,
                sql_ast::BinaryOperator::And => BinaryOp::And,
                sql_ast::BinaryOperator::Or => BinaryOp::Or,
                other => {
                    return Err(DbError::UnsupportedOperation(format!(
                        "Unsupported operator: {}",
                        other
                    )));
                }
            };

            Ok(Expr::BinaryOp {
                left: Box::new(convert_expr(*left)?),
                op,
                right: Box::new(convert_expr(*right)?),
            })
        }
        other => Err(DbError::UnsupportedOperation(format!(
            "Unsupported expression: {}",
            other
        ))),
    }
}

fn convert_value(value: &sql_ast::Value) -> DbResult<Value> {
    match value {
        sql_ast::Value::Number(n, _) => {
            if let Ok(i) = n.parse::<i64>() {
                return Ok(Value::Integer(i));
            }
            n.parse::<f64>()
                .map(Value::Float)
                .map_err(|_| DbError::ParseError(format!("Invalid number: {}", n)))
        }
        sql_ast::Value::SingleQuotedString(s) => Ok(Value::Text(s.clone())),
        sql_ast::Value::Boolean(b) => Ok(Value::Boolean(*b)),
        sql_ast::Value::Null => Ok(Value::Null),
        other => Err(DbError::UnsupportedOperation(format!(
            "Unsupported literal: {}",
            other
        ))),
    }
}

fn table_factor_name(factor: &sql_ast::TableFactor, statement: &str) -> DbResult<String> {
    match factor {
        sql_ast::TableFactor::Table { name, .. } => extract_table_name(name),
        _ => Err(DbError::UnsupportedOperation(format!(
            "Complex table references not supported in {}",
            statement
        ))),
    }
}

fn extract_table_name(name: &sql_ast::ObjectName) -> DbResult<String> {
    name.0
        .last()
        .map(|part| unquote(&part.to_string()))
        .ok_or_else(|| DbError::ParseError("Invalid table name".into()))
}

/// Strips one level of `"..."` or `` `...` `` quoting from a rendered
/// identifier.
fn unquote(rendered: &impl Display) -> String {
    let text = rendered.to_string();
    for quote in ['"', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            let inner = &text[1..text.len() - 1];
            let doubled = format!("{quote}{quote}");
            return inner.replace(&doubled, &quote.to_string());
        }
    }
    text
}

// ============================================================================
// TESTS
// ============================================================================
