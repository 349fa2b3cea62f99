use std::collections::VecDeque;

use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;
use sqlwindow_storage::{Column, Field, Table};

/// Re-attaches function results to the input pages they belong to.
///
/// Input pages are held until every one of their rows has a committed
/// result, then emitted with one extra column per function. Output pages
/// therefore mirror input pages one for one.
#[derive(Debug)]
pub struct OutputMaterializer {
    fields: Vec<Field>,
    pending: VecDeque<Table>,
    results: Vec<VecDeque<Value>>,
    committed: usize,
    ready: VecDeque<Table>,
}

impl OutputMaterializer {
    pub fn new(fields: Vec<Field>) -> Self {
        let results = fields.iter().map(|_| VecDeque::new()).collect();
        Self {
            fields,
            pending: VecDeque::new(),
            results,
            committed: 0,
            ready: VecDeque::new(),
        }
    }

    pub fn enqueue_page(&mut self, page: Table) -> Result<()> {
        self.pending.push_back(page);
        self.emit_completed()
    }

    /// Appends the results of `rows` consecutive input rows, one vector per
    /// function.
    pub fn commit(&mut self, rows: usize, results: Vec<Vec<Value>>) -> Result<()> {
        if results.len() != self.results.len() {
            return Err(Error::internal(format!(
                "expected results for {} functions, got {}",
                self.results.len(),
                results.len()
            )));
        }
        if results.iter().any(|values| values.len() != rows) {
            return Err(Error::internal(format!(
                "function results do not cover {} rows",
                rows
            )));
        }
        if self.pending_rows() < rows {
            return Err(Error::internal(format!(
                "{} results committed for {} pending rows",
                rows,
                self.pending_rows()
            )));
        }
        for (buffer, values) in self.results.iter_mut().zip(results) {
            buffer.extend(values);
        }
        self.committed += rows;
        self.emit_completed()
    }

    pub fn pop_ready(&mut self) -> Option<Table> {
        self.ready.pop_front()
    }

    pub fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }

    /// Rows enqueued but still waiting for results.
    pub fn pending_rows(&self) -> usize {
        let enqueued: usize = self.pending.iter().map(Table::row_count).sum();
        enqueued - self.committed
    }

    fn emit_completed(&mut self) -> Result<()> {
        while let Some(rows) = self.pending.front().map(Table::row_count) {
            if self.committed < rows {
                break;
            }
            let Some(page) = self.pending.pop_front() else {
                break;
            };
            let mut extra = Vec::with_capacity(self.fields.len());
            for (field, values) in self.fields.iter().zip(self.results.iter_mut()) {
                let values: Vec<Value> = values.drain(..rows).collect();
                extra.push((field.clone(), Column::from_values(&field.data_type, &values)?));
            }
            self.committed -= rows;
            self.ready.push_back(page.with_appended_columns(extra)?);
        }
        Ok(())
    }
}
