use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;

pub const DEFAULT_MAX_PARTITION_ROWS: usize = 1_000_000;

pub const MAX_PARTITION_ROWS_VARIABLE: &str = "WINDOW_MAX_PARTITION_ROWS";
pub const DEFAULT_NULLS_FIRST_VARIABLE: &str = "WINDOW_DEFAULT_NULLS_FIRST";

/// Knobs for one window operator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSettings {
    /// Largest partition the operator buffers before failing with
    /// `PartitionTooLarge`.
    pub max_partition_rows: usize,
    /// Null placement for `ORDER BY` keys that do not say `NULLS FIRST` or
    /// `NULLS LAST`.
    pub default_nulls_first: bool,
}

impl WindowSettings {
    pub fn new() -> Self {
        Self {
            max_partition_rows: DEFAULT_MAX_PARTITION_ROWS,
            default_nulls_first: false,
        }
    }

    /// Zero is accepted here and rejected by [`validate`](Self::validate)
    /// when an operator is built.
    pub fn with_max_partition_rows(mut self, rows: usize) -> Self {
        self.max_partition_rows = rows;
        self
    }

    pub fn with_default_nulls_first(mut self, nulls_first: bool) -> Self {
        self.default_nulls_first = nulls_first;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_partition_rows == 0 {
            return Err(Error::invalid_argument(format!(
                "{} must be positive, got 0",
                MAX_PARTITION_ROWS_VARIABLE
            )));
        }
        Ok(())
    }

    /// Applies one session variable. Names are case-insensitive.
    pub fn apply_variable(&mut self, name: &str, value: &Value) -> Result<()> {
        match name.to_ascii_uppercase().as_str() {
            MAX_PARTITION_ROWS_VARIABLE => {
                let rows = value
                    .as_i64()
                    .filter(|rows| *rows > 0)
                    .and_then(|rows| usize::try_from(rows).ok())
                    .ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "{} must be a positive INT64, got {:?}",
                            MAX_PARTITION_ROWS_VARIABLE, value
                        ))
                    })?;
                self.max_partition_rows = rows;
            }
            DEFAULT_NULLS_FIRST_VARIABLE => {
                self.default_nulls_first = value.as_bool().ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "{} must be a BOOL, got {:?}",
                        DEFAULT_NULLS_FIRST_VARIABLE, value
                    ))
                })?;
            }
            other => {
                return Err(Error::invalid_argument(format!(
                    "unknown window setting: {}",
                    other
                )));
            }
        }
        Ok(())
    }

    pub fn from_variables<'a>(
        variables: impl IntoIterator<Item = (&'a str, &'a Value)>,
    ) -> Result<Self> {
        let mut settings = Self::new();
        for (name, value) in variables {
            settings.apply_variable(name, value)?;
        }
        Ok(settings)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new()
    }
}
