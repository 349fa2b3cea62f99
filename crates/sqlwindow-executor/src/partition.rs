use std::ops::Range;

use sqlwindow_common::types::Value;
use sqlwindow_storage::{Column, Table};

/// Splits an ordered page into runs of rows with equal partition keys.
///
/// Yields half-open row ranges in input order. NULL keys compare equal to
/// each other, so all NULL-keyed rows of a run share one partition. With no
/// partition keys the whole page is a single range.
pub struct PartitionDetector<'a> {
    columns: Vec<&'a Column>,
    row_count: usize,
    next: usize,
}

impl<'a> PartitionDetector<'a> {
    pub fn new(page: &'a Table, partition_by: &[usize]) -> Self {
        let columns = partition_by
            .iter()
            .filter_map(|&idx| page.column(idx))
            .collect();
        Self {
            columns,
            row_count: page.row_count(),
            next: 0,
        }
    }

    fn same_partition(&self, a: usize, b: usize) -> bool {
        self.columns
            .iter()
            .all(|col| col.get_value(a) == col.get_value(b))
    }
}

impl Iterator for PartitionDetector<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.row_count {
            return None;
        }
        let start = self.next;
        let mut end = start + 1;
        while end < self.row_count && self.same_partition(start, end) {
            end += 1;
        }
        self.next = end;
        Some(start..end)
    }
}

/// Partition key values of one row.
pub fn partition_key(page: &Table, partition_by: &[usize], row: usize) -> Vec<Value> {
    partition_by
        .iter()
        .map(|&idx| {
            page.column(idx)
                .map(|col| col.get_value(row))
                .unwrap_or(Value::Null)
        })
        .collect()
}
