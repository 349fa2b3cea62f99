use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::{DataType, Value};

use super::Column;

macro_rules! zip_variants {
    ($dst:expr, $src:expr, | $d1:ident, $n1:ident, $d2:ident, $n2:ident | $body:expr) => {
        match ($dst, $src) {
            (
                Column::Bool { data: $d1, nulls: $n1 },
                Column::Bool { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Int64 { data: $d1, nulls: $n1 },
                Column::Int64 { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Float64 { data: $d1, nulls: $n1 },
                Column::Float64 { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Numeric { data: $d1, nulls: $n1 },
                Column::Numeric { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::String { data: $d1, nulls: $n1 },
                Column::String { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Bytes { data: $d1, nulls: $n1 },
                Column::Bytes { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Date { data: $d1, nulls: $n1 },
                Column::Date { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Time { data: $d1, nulls: $n1 },
                Column::Time { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::DateTime { data: $d1, nulls: $n1 },
                Column::DateTime { data: $d2, nulls: $n2 },
            ) => $body,
            (
                Column::Timestamp { data: $d1, nulls: $n1 },
                Column::Timestamp { data: $d2, nulls: $n2 },
            ) => $body,
            (dst, src) => {
                return Err(Error::type_mismatch(
                    dst.data_type().to_string(),
                    src.data_type().to_string(),
                ));
            }
        }
    };
}

impl Column {
    pub fn gather(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&max_idx) = indices.iter().max()
            && max_idx >= len
        {
            return Err(Error::internal(format!(
                "gather: index {} out of bounds for column of length {}",
                max_idx, len
            )));
        }
        let mut out = Column::new(&self.data_type());
        zip_variants!(&mut out, self, |d1, n1, d2, n2| {
            for &idx in indices {
                d1.push(d2[idx].clone());
            }
            *n1 = n2.gather(indices);
        });
        Ok(out)
    }

    /// Appends rows `start..end` of `other`, which must have the same type.
    pub fn append_range(&mut self, other: &Column, start: usize, end: usize) -> Result<()> {
        let end = end.min(other.len());
        if start >= end {
            return if self.data_type() == other.data_type() {
                Ok(())
            } else {
                Err(Error::type_mismatch(
                    self.data_type().to_string(),
                    other.data_type().to_string(),
                ))
            };
        }
        zip_variants!(self, other, |d1, n1, d2, n2| {
            for v in d2[start..end].iter().cloned() {
                d1.push(v);
            }
            n1.extend_range(n2, start, end);
        });
        Ok(())
    }

    pub fn extend(&mut self, other: &Column) -> Result<()> {
        self.append_range(other, 0, other.len())
    }

    pub fn from_values(data_type: &DataType, values: &[Value]) -> Result<Self> {
        let mut column = Column::new(data_type);
        for value in values {
            column.push(value.clone())?;
        }
        Ok(column)
    }
}
