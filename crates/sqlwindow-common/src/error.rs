use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid frame bound: {0}")]
    InvalidFrameBound(String),
    #[error("Unsupported RANGE type: {0}")]
    UnsupportedRangeType(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Partition too large: {rows} rows exceeds the limit of {limit}")]
    PartitionTooLarge { rows: usize, limit: usize },
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn invalid_frame_bound(msg: impl Into<String>) -> Self {
        Error::InvalidFrameBound(msg.into())
    }

    pub fn unsupported_range_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedRangeType(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn partition_too_large(rows: usize, limit: usize) -> Self {
        Error::PartitionTooLarge { rows, limit }
    }

    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound(name.into())
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Error::SchemaMismatch(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}
