#[macro_use]
mod macros;

mod access;
mod mutation;
mod ops;
mod serde;

use ::serde::{Deserialize, Serialize};
use aligned_vec::AVec;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlwindow_common::types::DataType;

pub use self::serde::A64;
use crate::NullBitmap;

/// A typed, nullable column of values. Slots marked NULL in `nulls` hold a
/// placeholder in `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Column {
    Bool {
        data: Vec<bool>,
        nulls: NullBitmap,
    },
    Int64 {
        #[serde(
            serialize_with = "serde::serialize_aligned",
            deserialize_with = "serde::deserialize_aligned"
        )]
        data: AVec<i64, A64>,
        nulls: NullBitmap,
    },
    Float64 {
        #[serde(
            serialize_with = "serde::serialize_aligned",
            deserialize_with = "serde::deserialize_aligned"
        )]
        data: AVec<f64, A64>,
        nulls: NullBitmap,
    },
    Numeric {
        data: Vec<Decimal>,
        nulls: NullBitmap,
    },
    String {
        data: Vec<String>,
        nulls: NullBitmap,
    },
    Bytes {
        data: Vec<Vec<u8>>,
        nulls: NullBitmap,
    },
    Date {
        data: Vec<NaiveDate>,
        nulls: NullBitmap,
    },
    Time {
        data: Vec<NaiveTime>,
        nulls: NullBitmap,
    },
    DateTime {
        data: Vec<NaiveDateTime>,
        nulls: NullBitmap,
    },
    Timestamp {
        data: Vec<DateTime<Utc>>,
        nulls: NullBitmap,
    },
}

impl Column {
    pub fn new(data_type: &DataType) -> Self {
        match data_type {
            DataType::Bool => Column::Bool {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::Int64 => Column::Int64 {
                data: AVec::new(64),
                nulls: NullBitmap::new(),
            },
            DataType::Float64 => Column::Float64 {
                data: AVec::new(64),
                nulls: NullBitmap::new(),
            },
            DataType::Numeric => Column::Numeric {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::String | DataType::Unknown => Column::String {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::Bytes => Column::Bytes {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::Date => Column::Date {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::Time => Column::Time {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::DateTime => Column::DateTime {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
            DataType::Timestamp => Column::Timestamp {
                data: Vec::new(),
                nulls: NullBitmap::new(),
            },
        }
    }

    pub fn len(&self) -> usize {
        for_each_variant!(self, |data| data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Bool { .. } => DataType::Bool,
            Column::Int64 { .. } => DataType::Int64,
            Column::Float64 { .. } => DataType::Float64,
            Column::Numeric { .. } => DataType::Numeric,
            Column::String { .. } => DataType::String,
            Column::Bytes { .. } => DataType::Bytes,
            Column::Date { .. } => DataType::Date,
            Column::Time { .. } => DataType::Time,
            Column::DateTime { .. } => DataType::DateTime,
            Column::Timestamp { .. } => DataType::Timestamp,
        }
    }

    pub fn nulls(&self) -> &NullBitmap {
        with_nulls!(self, |nulls| nulls)
    }

    pub fn count_null(&self) -> usize {
        with_nulls!(self, |nulls| nulls.count_null())
    }

    pub fn count_valid(&self) -> usize {
        self.len() - self.count_null()
    }
}
