//! sqlwindow - window-function evaluation over partitioned, ordered columnar pages.
//!
//! The engine evaluates the value-at-frame-position family of window functions
//! (`FIRST_VALUE`, `LAST_VALUE`, `NTH_VALUE`) over `ROWS`, `RANGE` and `GROUPS`
//! frames. Input pages must already be sorted by the partition keys and then
//! by the order keys.
//!
//! # Architecture
//!
//! ```text
//! pages → PartitionDetector → PartitionBuffer → FrameResolver → ValueFunction → OutputMaterializer → pages
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlwindow::{
//!     DataType, Field, Schema, SortExpr, Table, Value, WindowEngine, WindowFunctionCall,
//!     WindowSpec,
//! };
//!
//! let schema = Schema::from_fields(vec![
//!     Field::nullable("status", DataType::String),
//!     Field::nullable("key", DataType::Int64),
//! ]);
//! let page = Table::from_values(
//!     schema.clone(),
//!     vec![
//!         vec![Value::string("F"), Value::int64(3)],
//!         vec![Value::string("F"), Value::int64(5)],
//!     ],
//! )?;
//!
//! let spec = WindowSpec::new(vec![0], vec![SortExpr::asc(1)]);
//! let calls = [WindowFunctionCall::first_value(1, "first_key")];
//! let output = WindowEngine::new().execute(schema, vec![page], &spec, &calls)?;
//! ```

pub use sqlwindow_common::error::{Error, Result};
pub use sqlwindow_common::types::{DataType, Value};
pub use sqlwindow_executor::{
    DEFAULT_MAX_PARTITION_ROWS, DEFAULT_NULLS_FIRST_VARIABLE, MAX_PARTITION_ROWS_VARIABLE,
    WindowMetrics, WindowOperator, WindowSettings,
};
pub use sqlwindow_ir::{
    SortExpr, WindowFrame, WindowFrameBound, WindowFrameUnit, WindowFunction, WindowFunctionCall,
    WindowSpec,
};
pub use sqlwindow_storage::{Column, Field, FieldMode, Schema, Table};
use tracing::debug;

/// Entry point for running window functions over a stream of pages.
///
/// `WindowEngine` only carries [`WindowSettings`]; every call to
/// [`execute`](Self::execute) builds a fresh [`WindowOperator`], so one engine
/// can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowEngine {
    settings: WindowSettings,
}

impl WindowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: WindowSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Builds an operator for pull-based use (`add_input` / `get_output`).
    pub fn create_operator(
        &self,
        schema: Schema,
        spec: &WindowSpec,
        calls: &[WindowFunctionCall],
    ) -> Result<WindowOperator> {
        WindowOperator::try_new(schema, spec, calls, self.settings)
    }

    /// Evaluates `calls` over `pages` and returns one output page per input
    /// page. Each output page carries the input columns followed by one
    /// column per call.
    pub fn execute(
        &self,
        schema: Schema,
        pages: impl IntoIterator<Item = Table>,
        spec: &WindowSpec,
        calls: &[WindowFunctionCall],
    ) -> Result<Vec<Table>> {
        let mut operator = self.create_operator(schema, spec, calls)?;
        let output = operator.execute(pages)?;
        debug!(
            pages = output.len(),
            rows = operator.metrics().get_row_count(),
            "window evaluation complete"
        );
        Ok(output)
    }
}
