//! Window-function evaluation over partitioned, ordered columnar input.
//!
//! Input pages arrive sorted by partition keys and then order keys. The
//! [`WindowOperator`] splits them into partitions, buffers each partition in
//! full, resolves every row's frame and evaluates FIRST_VALUE, LAST_VALUE and
//! NTH_VALUE against it.

mod buffer;
pub mod frame;
mod function;
mod materializer;
mod metrics;
mod operator;
mod ordering;
mod partition;
mod settings;

pub use buffer::PartitionBuffer;
pub use frame::{FrameCursor, FrameResolver, PartitionView, ResolvedFrame, validate_frame};
pub use function::{ValueFunction, ValueFunctionKind};
pub use materializer::OutputMaterializer;
pub use metrics::WindowMetrics;
pub use operator::WindowOperator;
pub use ordering::{OrderComparator, SortKey, compare_with_key};
pub use partition::{PartitionDetector, partition_key};
pub use settings::{
    DEFAULT_MAX_PARTITION_ROWS, DEFAULT_NULLS_FIRST_VARIABLE, MAX_PARTITION_ROWS_VARIABLE,
    WindowSettings,
};
