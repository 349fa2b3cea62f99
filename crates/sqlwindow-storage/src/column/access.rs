use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;

use super::Column;

impl Column {
    pub fn is_null(&self, index: usize) -> bool {
        with_nulls!(self, |nulls| nulls.is_null(index))
    }

    pub fn is_all_null(&self) -> bool {
        with_nulls!(self, |nulls| nulls.is_all_null())
    }

    pub fn get(&self, index: usize) -> Result<Value> {
        if index >= self.len() {
            return Err(Error::internal(format!(
                "Column index {} out of bounds (len: {})",
                index,
                self.len()
            )));
        }
        Ok(self.get_value(index))
    }

    /// Returns the value at `index`, or NULL when the slot is null or out of
    /// range.
    pub fn get_value(&self, index: usize) -> Value {
        if index >= self.len() || self.is_null(index) {
            return Value::Null;
        }

        match self {
            Column::Bool { data, .. } => Value::Bool(data[index]),
            Column::Int64 { data, .. } => Value::Int64(data[index]),
            Column::Float64 { data, .. } => Value::float64(data[index]),
            Column::Numeric { data, .. } => Value::Numeric(data[index]),
            Column::String { data, .. } => Value::String(data[index].clone()),
            Column::Bytes { data, .. } => Value::Bytes(data[index].clone()),
            Column::Date { data, .. } => Value::Date(data[index]),
            Column::Time { data, .. } => Value::Time(data[index]),
            Column::DateTime { data, .. } => Value::DateTime(data[index]),
            Column::Timestamp { data, .. } => Value::Timestamp(data[index]),
        }
    }
}
