use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;

use crate::{Column, Field, Schema};

/// A page of rows stored column-wise. Column order follows the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    schema: Schema,
    columns: IndexMap<String, Arc<Column>>,
    row_count: usize,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|f| (f.name.clone(), Arc::new(Column::new(&f.data_type))))
            .collect();
        Self {
            schema,
            columns,
            row_count: 0,
        }
    }

    pub fn from_values(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self> {
        schema.validate()?;
        let mut table = Self::new(schema);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get_index(idx).map(|(_, arc)| arc.as_ref())
    }

    pub fn columns(&self) -> &IndexMap<String, Arc<Column>> {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::schema_mismatch(format!(
                "row has {} values, table has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        if let Some((col, value)) = self
            .columns
            .values()
            .zip(&values)
            .find(|(col, value)| !col.accepts(value))
        {
            return Err(Error::type_mismatch(
                col.data_type().to_string(),
                value.data_type().to_string(),
            ));
        }
        for (col, value) in self.columns.values_mut().zip(values) {
            Arc::make_mut(col).push(value)?;
        }
        self.row_count += 1;
        Ok(())
    }

    pub fn get_row(&self, index: usize) -> Result<Vec<Value>> {
        if index >= self.row_count {
            return Err(Error::internal(format!(
                "Row index {} out of bounds (count: {})",
                index, self.row_count
            )));
        }
        Ok(self.columns.values().map(|c| c.get_value(index)).collect())
    }

    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        (0..self.row_count)
            .map(|i| self.columns.values().map(|c| c.get_value(i)).collect())
            .collect()
    }

    pub fn gather_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut new_columns = IndexMap::with_capacity(self.columns.len());
        for (name, col) in &self.columns {
            new_columns.insert(name.clone(), Arc::new(col.gather(indices)?));
        }
        Ok(Self {
            schema: self.schema.clone(),
            columns: new_columns,
            row_count: indices.len(),
        })
    }

    /// Returns a copy of this table with `extra` columns appended after the
    /// existing ones. Existing columns are shared, not copied.
    pub fn with_appended_columns(&self, extra: Vec<(Field, Column)>) -> Result<Self> {
        let mut schema = self.schema.clone();
        let mut columns = self.columns.clone();
        for (field, column) in extra {
            if column.len() != self.row_count {
                return Err(Error::schema_mismatch(format!(
                    "column '{}' has {} rows, expected {}",
                    field.name,
                    column.len(),
                    self.row_count
                )));
            }
            if columns.contains_key(&field.name) {
                return Err(Error::schema_mismatch(format!(
                    "Duplicate field name: {}",
                    field.name
                )));
            }
            columns.insert(field.name.clone(), Arc::new(column));
            schema.add_field(field);
        }
        Ok(Self {
            schema,
            columns,
            row_count: self.row_count,
        })
    }
}
