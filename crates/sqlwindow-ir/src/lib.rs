//! Window specifications handed to the executor: partitioning, ordering,
//! frames and the value-at-frame-position function calls.

mod window;

pub use window::{
    SortExpr, WindowFrame, WindowFrameBound, WindowFrameUnit, WindowFunction, WindowFunctionCall,
    WindowSpec,
};
