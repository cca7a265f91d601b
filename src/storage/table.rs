use std::collections::BTreeMap;

use crate::core::{Column, DbError, DbResult, Row, Schema, Value};

#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    schema: Schema,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            schema: Schema::new(columns),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Rows of one table, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Table {
    schema: TableSchema,
    rows: BTreeMap<usize, Row>,
    next_row_id: usize,
    next_auto_value: i64,
}

impl Table {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
            next_row_id: 0,
            next_auto_value: 1,
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = (&usize, &Row)> {
        self.rows.iter()
    }

    pub fn insert(&mut self, mut row: Row) -> DbResult<usize> {
        self.fill_auto_increment(&mut row)?;
        let row = self.validate_row(row)?;
        self.check_primary_key(&row, None)?;
        self.track_auto_value(&row);

        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.insert(id, row);
        Ok(id)
    }

    pub fn update(&mut self, id: usize, new_row: Row) -> DbResult<bool> {
        if !self.rows.contains_key(&id) {
            return Ok(false);
        }

        let new_row = self.validate_row(new_row)?;
        self.check_primary_key(&new_row, Some(id))?;
        self.track_auto_value(&new_row);
        self.rows.insert(id, new_row);
        Ok(true)
    }

    /// Inserts every row or none of them.
    pub fn insert_all(&mut self, rows: Vec<Row>) -> DbResult<usize> {
        let count = rows.len();
        let mut staged = self.clone();
        for row in rows {
            staged.insert(row)?;
        }
        *self = staged;
        Ok(count)
    }

    /// Applies every `(row id, new row)` pair or none of them. Returns the
    /// number of rows that still existed.
    pub fn update_all(&mut self, updates: Vec<(usize, Row)>) -> DbResult<usize> {
        let mut staged = self.clone();
        let mut count = 0;
        for (id, new_row) in updates {
            if staged.update(id, new_row)? {
                count += 1;
            }
        }
        *self = staged;
        Ok(count)
    }

    pub fn delete_rows(&mut self, ids: &[usize]) -> usize {
        ids.iter().filter(|id| self.rows.remove(*id).is_some()).count()
    }

    fn fill_auto_increment(&mut self, row: &mut Row) -> DbResult<()> {
        for (idx, column) in self.schema.schema().columns().iter().enumerate() {
            if !column.auto_increment {
                continue;
            }
            let cell = row.get_mut(idx).ok_or_else(|| {
                DbError::ExecutionError(format!("Row is missing column '{}'", column.name))
            })?;
            if cell.is_null() {
                *cell = Value::Integer(self.next_auto_value);
                self.next_auto_value += 1;
            }
        }
        Ok(())
    }

    fn track_auto_value(&mut self, row: &Row) {
        for (idx, column) in self.schema.schema().columns().iter().enumerate() {
            if column.auto_increment
                && let Some(Value::Integer(value)) = row.get(idx)
                && *value >= self.next_auto_value
            {
                self.next_auto_value = value + 1;
            }
        }
    }

    fn validate_row(&self, row: Row) -> DbResult<Row> {
        let columns = self.schema.schema().columns();
        if row.len() != columns.len() {
            return Err(DbError::ExecutionError(format!(
                "Table '{}' has {} columns but {} values were supplied",
                self.schema.name(),
                columns.len(),
                row.len()
            )));
        }

        columns
            .iter()
            .zip(row)
            .map(|(column, value)| column.validate(value))
            .collect()
    }

    fn check_primary_key(&self, row: &Row, skip_id: Option<usize>) -> DbResult<()> {
        let Some(pk_idx) = self.schema.schema().primary_key_index() else {
            return Ok(());
        };

        let key = &row[pk_idx];
        let duplicate = self
            .rows
            .iter()
            .filter(|(id, _)| Some(**id) != skip_id)
            .any(|(_, existing)| &existing[pk_idx] == key);

        if duplicate {
            return Err(DbError::ConstraintViolation(format!(
                "Duplicate primary key {} in table '{}'",
                key,
                self.schema.name()
            )));
        }
        Ok(())
    }
}
