use std::ops::Range;

use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;
use sqlwindow_storage::{Column, Schema, Table};

use crate::partition::partition_key;

/// Columnar copy of the partition currently being assembled, with O(1)
/// positional access for frame resolution.
#[derive(Debug)]
pub struct PartitionBuffer {
    columns: Vec<Column>,
    partition_by: Vec<usize>,
    key: Option<Vec<Value>>,
    rows: usize,
    max_rows: usize,
}

impl PartitionBuffer {
    pub fn new(schema: &Schema, partition_by: &[usize], max_rows: usize) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|f| Column::new(&f.data_type))
            .collect();
        Self {
            columns,
            partition_by: partition_by.to_vec(),
            key: None,
            rows: 0,
            max_rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Result<&Column> {
        self.columns
            .get(idx)
            .ok_or_else(|| Error::column_not_found(format!("#{}", idx)))
    }

    /// True when `row` of `page` continues the buffered partition.
    pub fn continues_partition(&self, page: &Table, row: usize) -> bool {
        match &self.key {
            Some(key) => *key == partition_key(page, &self.partition_by, row),
            None => false,
        }
    }

    /// Appends `rows` of `page`. The caller guarantees they share one
    /// partition key with anything already buffered.
    pub fn append(&mut self, page: &Table, rows: Range<usize>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let total = self.rows + rows.len();
        if total > self.max_rows {
            return Err(Error::partition_too_large(total, self.max_rows));
        }
        if page.num_columns() != self.columns.len() {
            return Err(Error::schema_mismatch(format!(
                "page has {} columns, partition buffer has {}",
                page.num_columns(),
                self.columns.len()
            )));
        }
        for (idx, column) in self.columns.iter_mut().enumerate() {
            let source = page
                .column(idx)
                .ok_or_else(|| Error::column_not_found(format!("#{}", idx)))?;
            column.append_range(source, rows.start, rows.end)?;
        }
        if self.key.is_none() {
            self.key = Some(partition_key(page, &self.partition_by, rows.start));
        }
        self.rows = total;
        Ok(())
    }

    /// Drops the buffered rows, keeping the column allocations.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
        self.key = None;
        self.rows = 0;
    }
}
