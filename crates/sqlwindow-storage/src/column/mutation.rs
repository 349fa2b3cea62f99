use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::{DataType, Value};

use super::Column;

impl Column {
    /// Whether [`push`](Self::push) would take `value` without a type error.
    pub fn accepts(&self, value: &Value) -> bool {
        let column_type = self.data_type();
        match value.data_type() {
            DataType::Unknown => true,
            DataType::Int64 => matches!(
                column_type,
                DataType::Int64 | DataType::Float64 | DataType::Numeric
            ),
            other => other == column_type,
        }
    }

    /// Appends `value`. NULL fits every column; INT64 widens into FLOAT64 and
    /// NUMERIC columns. Anything else must match the column type exactly.
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (Column::Bool { data, nulls }, Value::Null) => {
                data.push(false);
                nulls.push(true);
            }
            (Column::Bool { data, nulls }, Value::Bool(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Int64 { data, nulls }, Value::Null) => {
                data.push(0);
                nulls.push(true);
            }
            (Column::Int64 { data, nulls }, Value::Int64(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Float64 { data, nulls }, Value::Null) => {
                data.push(0.0);
                nulls.push(true);
            }
            (Column::Float64 { data, nulls }, Value::Float64(v)) => {
                data.push(v.0);
                nulls.push(false);
            }
            (Column::Float64 { data, nulls }, Value::Int64(v)) => {
                data.push(v as f64);
                nulls.push(false);
            }
            (Column::Numeric { data, nulls }, Value::Null) => {
                data.push(Decimal::ZERO);
                nulls.push(true);
            }
            (Column::Numeric { data, nulls }, Value::Numeric(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Numeric { data, nulls }, Value::Int64(v)) => {
                data.push(Decimal::from(v));
                nulls.push(false);
            }
            (Column::String { data, nulls }, Value::Null) => {
                data.push(String::new());
                nulls.push(true);
            }
            (Column::String { data, nulls }, Value::String(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Bytes { data, nulls }, Value::Null) => {
                data.push(Vec::new());
                nulls.push(true);
            }
            (Column::Bytes { data, nulls }, Value::Bytes(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Date { data, nulls }, Value::Null) => {
                data.push(NaiveDate::default());
                nulls.push(true);
            }
            (Column::Date { data, nulls }, Value::Date(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Time { data, nulls }, Value::Null) => {
                data.push(NaiveTime::MIN);
                nulls.push(true);
            }
            (Column::Time { data, nulls }, Value::Time(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::DateTime { data, nulls }, Value::Null) => {
                data.push(NaiveDateTime::default());
                nulls.push(true);
            }
            (Column::DateTime { data, nulls }, Value::DateTime(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (Column::Timestamp { data, nulls }, Value::Null) => {
                data.push(chrono::DateTime::default());
                nulls.push(true);
            }
            (Column::Timestamp { data, nulls }, Value::Timestamp(v)) => {
                data.push(v);
                nulls.push(false);
            }
            (col, value) => {
                return Err(Error::type_mismatch(
                    col.data_type().to_string(),
                    value.data_type().to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        for_each_variant!(self, |data, nulls| {
            data.clear();
            nulls.clear();
        })
    }
}
