#![allow(dead_code)]

pub use sqlwindow_common;
pub use sqlwindow_storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlwindow_common::types::{DataType, Value};
use sqlwindow_common::Result;
use sqlwindow_storage::{Field, Schema, Table};

pub const NULL: Value = Value::Null;

pub const ORDERKEY: usize = 0;
pub const ORDERSTATUS: usize = 1;
pub const ORDERDATE: usize = 2;

pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for &Value {
    fn into_value(self) -> Value {
        self.clone()
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::int64(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::int64(self as i64)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::float64(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::bool_val(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for Decimal {
    fn into_value(self) -> Value {
        Value::numeric(self)
    }
}

impl IntoValue for NaiveDate {
    fn into_value(self) -> Value {
        Value::date(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

pub fn convert_to_value<T: IntoValue>(val: T) -> Value {
    val.into_value()
}

/// Parses a `YYYY-MM-DD` literal into a DATE value.
pub fn date(literal: &str) -> Value {
    let parsed = NaiveDate::parse_from_str(literal, "%Y-%m-%d")
        .unwrap_or_else(|e| panic!("invalid date literal '{}': {}", literal, e));
    Value::date(parsed)
}

#[macro_export]
macro_rules! row {
    ($($val:expr),* $(,)?) => {
        vec![$($crate::convert_to_value($val)),*]
    };
}

/// Builds a single `Table` page from a field list and literal rows.
///
/// ```ignore
/// let page = table!(
///     [("k", DataType::Int64), ("v", DataType::String)];
///     [1, "a"],
///     [2, NULL],
/// );
/// ```
#[macro_export]
macro_rules! table {
    ([$(($name:expr, $ty:expr)),* $(,)?]; $([$($val:expr),* $(,)?]),* $(,)?) => {{
        let schema = $crate::schema(&[$(($name, $ty)),*]);
        let rows: Vec<Vec<$crate::sqlwindow_common::types::Value>> = vec![
            $($crate::row![$($val),*]),*
        ];
        $crate::sqlwindow_storage::Table::from_values(schema, rows)
            .expect("table! rows must match the declared fields")
    }};
}

#[macro_export]
macro_rules! assert_column_eq {
    ($pages:expr, $col:expr, [$($val:expr),* $(,)?]) => {{
        let actual = $crate::column_values(&$pages, $col);
        let expected: Vec<$crate::sqlwindow_common::types::Value> = vec![
            $($crate::convert_to_value($val)),*
        ];
        assert_eq!(
            actual, expected,
            "column {} mismatch\n\nActual ({} rows):\n{:?}\n\nExpected ({} rows):\n{:?}",
            $col,
            actual.len(),
            actual,
            expected.len(),
            expected
        );
    }};
}

#[macro_export]
macro_rules! assert_table_rows_eq {
    ($pages:expr, [$( [$($val:expr),* $(,)?] ),* $(,)?]) => {{
        let actual_rows = $crate::rows(&$pages);
        let expected_rows: Vec<Vec<$crate::sqlwindow_common::types::Value>> = vec![
            $($crate::row![$($val),*]),*
        ];
        if actual_rows != expected_rows {
            panic!(
                "Table mismatch!\n\nActual ({} rows):\n{:#?}\n\nExpected ({} rows):\n{:#?}",
                actual_rows.len(),
                actual_rows,
                expected_rows.len(),
                expected_rows
            );
        }
    }};
}

pub fn schema(fields: &[(&str, DataType)]) -> Schema {
    Schema::from_fields(
        fields
            .iter()
            .map(|(name, data_type)| Field::nullable(*name, *data_type))
            .collect(),
    )
}

pub fn orders_schema() -> Schema {
    schema(&[
        ("orderkey", DataType::Int64),
        ("orderstatus", DataType::String),
        ("orderdate", DataType::Date),
    ])
}

/// Ten TPC-H orders sorted by `orderstatus`, then `orderkey`.
pub fn orders_rows() -> Vec<Vec<Value>> {
    vec![
        row![3, "F", date("1993-10-14")],
        row![5, "F", date("1994-07-30")],
        row![6, "F", date("1992-02-21")],
        row![33, "F", date("1993-10-27")],
        row![1, "O", date("1996-01-02")],
        row![2, "O", date("1996-12-01")],
        row![4, "O", date("1995-10-11")],
        row![7, "O", date("1996-01-10")],
        row![32, "O", date("1995-07-16")],
        row![34, "O", date("1998-07-21")],
    ]
}

/// The same orders with NULLs sprinkled over every column, sorted by
/// `orderstatus` then `orderkey`, both NULLS LAST.
pub fn orders_with_nulls_rows() -> Vec<Vec<Value>> {
    vec![
        row![3, "F", date("1993-10-14")],
        row![5, "F", NULL],
        row![NULL, "F", date("1992-02-21")],
        row![NULL, "F", date("1993-10-27")],
        row![34, "O", date("1998-07-21")],
        row![NULL, "O", date("1996-12-01")],
        row![1, NULL, NULL],
        row![7, NULL, date("1996-01-10")],
        row![NULL, NULL, date("1995-10-11")],
        row![NULL, NULL, date("1995-07-16")],
    ]
}

pub fn orders() -> Table {
    Table::from_values(orders_schema(), orders_rows()).expect("orders fixture is well formed")
}

pub fn orders_with_nulls() -> Table {
    Table::from_values(orders_schema(), orders_with_nulls_rows())
        .expect("orders fixture is well formed")
}

/// Splits `table` into consecutive pages of at most `page_size` rows.
pub fn split_pages(table: &Table, page_size: usize) -> Vec<Table> {
    assert!(page_size > 0, "page_size must be positive");
    let indices: Vec<usize> = (0..table.row_count()).collect();
    indices
        .chunks(page_size)
        .map(|chunk| {
            table
                .gather_rows(chunk)
                .expect("chunk indices are in bounds")
        })
        .collect()
}

pub fn rows(pages: &[Table]) -> Vec<Vec<Value>> {
    pages.iter().flat_map(|page| page.to_rows()).collect()
}

pub fn column_values(pages: &[Table], col: usize) -> Vec<Value> {
    let mut values = Vec::new();
    for page in pages {
        let column = page
            .column(col)
            .unwrap_or_else(|| panic!("column {} not found", col));
        for row in 0..page.row_count() {
            values.push(column.get_value(row));
        }
    }
    values
}

pub fn column_nullable_i64(pages: &[Table], col: usize) -> Vec<Option<i64>> {
    column_values(pages, col)
        .iter()
        .map(|v| match v {
            Value::Null => None,
            other => Some(
                other
                    .as_i64()
                    .unwrap_or_else(|| panic!("expected INT64, got {:?}", other)),
            ),
        })
        .collect()
}

pub fn column_i64(pages: &[Table], col: usize) -> Vec<i64> {
    column_nullable_i64(pages, col)
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.unwrap_or_else(|| panic!("unexpected NULL at row {}", row)))
        .collect()
}

pub fn total_rows(pages: &[Table]) -> usize {
    pages.iter().map(|p| p.row_count()).sum()
}

pub fn page_sizes(pages: &[Table]) -> Vec<usize> {
    pages.iter().map(|p| p.row_count()).collect()
}

pub fn assert_row_count(pages: &[Table], expected_count: usize) {
    let actual_count = total_rows(pages);
    assert_eq!(
        actual_count, expected_count,
        "Expected {} rows, but got {}",
        expected_count, actual_count
    );
}

pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not equal within epsilon: actual={}, expected={}, diff={}, epsilon={}",
        actual,
        expected,
        diff,
        epsilon
    );
}

pub fn assert_error_contains<T>(result: Result<T>, keywords: &[&str]) {
    match result {
        Ok(_) => panic!("Expected error but got Ok result"),
        Err(e) => {
            let error_msg = e.to_string().to_lowercase();
            let found = keywords
                .iter()
                .any(|keyword| error_msg.contains(&keyword.to_lowercase()));
            assert!(
                found,
                "Error message '{}' does not contain any of the expected keywords: {:?}",
                e, keywords
            );
        }
    }
}
