use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;
use sqlwindow_ir::WindowFunction;
use sqlwindow_storage::Column;

use crate::frame::ResolvedFrame;

/// The value-at-frame-position family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFunctionKind {
    FirstValue,
    LastValue,
    /// One-based position within the frame.
    NthValue(usize),
}

/// A window function bound to the column it reads.
#[derive(Debug, Clone)]
pub struct ValueFunction {
    kind: ValueFunctionKind,
    argument: usize,
    partition_rows: usize,
}

impl ValueFunction {
    pub fn try_new(function: &WindowFunction, argument: usize) -> Result<Self> {
        let kind = match *function {
            WindowFunction::FirstValue => ValueFunctionKind::FirstValue,
            WindowFunction::LastValue => ValueFunctionKind::LastValue,
            WindowFunction::NthValue(n) if n > 0 => {
                let n = usize::try_from(n).map_err(|_| {
                    Error::invalid_argument(format!("NTH_VALUE position {} is too large", n))
                })?;
                ValueFunctionKind::NthValue(n)
            }
            WindowFunction::NthValue(n) => {
                return Err(Error::invalid_argument(format!(
                    "NTH_VALUE position must be positive, got {}",
                    n
                )));
            }
        };
        Ok(Self {
            kind,
            argument,
            partition_rows: 0,
        })
    }

    pub fn kind(&self) -> ValueFunctionKind {
        self.kind
    }

    pub fn argument(&self) -> usize {
        self.argument
    }

    /// Starts a new partition of `rows` rows.
    pub fn reset(&mut self, rows: usize) {
        self.partition_rows = rows;
    }

    /// Partition-local row the function reads for `frame`, if any.
    pub fn target_row(&self, frame: ResolvedFrame) -> Option<usize> {
        if frame.is_empty() {
            return None;
        }
        let row = match self.kind {
            ValueFunctionKind::FirstValue => frame.start,
            ValueFunctionKind::LastValue => frame.end,
            ValueFunctionKind::NthValue(n) => frame.start.checked_add(n - 1)?,
        };
        (row <= frame.end && row < self.partition_rows).then_some(row)
    }

    /// Reads the value for `frame` from `column`. Empty frames and positions
    /// past the frame end yield NULL.
    pub fn evaluate(&self, frame: ResolvedFrame, column: &Column) -> Value {
        match self.target_row(frame) {
            Some(row) => column.get_value(row),
            None => Value::Null,
        }
    }
}
