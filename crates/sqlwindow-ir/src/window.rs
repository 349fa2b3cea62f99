use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortExpr {
    pub column: usize,
    pub asc: bool,
    /// `None` defers to the operator's configured default.
    pub nulls_first: Option<bool>,
}

impl SortExpr {
    pub fn asc(column: usize) -> Self {
        Self {
            column,
            asc: true,
            nulls_first: None,
        }
    }

    pub fn desc(column: usize) -> Self {
        Self {
            column,
            asc: false,
            nulls_first: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls_first = Some(true);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls_first = Some(false);
        self
    }
}

/// `PARTITION BY` / `ORDER BY` shared by every call of one operator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowSpec {
    pub partition_by: Vec<usize>,
    pub order_by: Vec<SortExpr>,
}

impl WindowSpec {
    pub fn new(partition_by: Vec<usize>, order_by: Vec<SortExpr>) -> Self {
        Self {
            partition_by,
            order_by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFrameUnit {
    Rows,
    Range,
    Groups,
}

impl fmt::Display for WindowFrameUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFrameUnit::Rows => write!(f, "ROWS"),
            WindowFrameUnit::Range => write!(f, "RANGE"),
            WindowFrameUnit::Groups => write!(f, "GROUPS"),
        }
    }
}

/// `None` offsets are UNBOUNDED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFrameBound {
    CurrentRow,
    Preceding(Option<i64>),
    Following(Option<i64>),
}

impl WindowFrameBound {
    pub fn offset(&self) -> Option<i64> {
        match self {
            WindowFrameBound::CurrentRow => None,
            WindowFrameBound::Preceding(n) | WindowFrameBound::Following(n) => *n,
        }
    }
}

impl fmt::Display for WindowFrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFrameBound::CurrentRow => write!(f, "CURRENT ROW"),
            WindowFrameBound::Preceding(None) => write!(f, "UNBOUNDED PRECEDING"),
            WindowFrameBound::Preceding(Some(n)) => write!(f, "{} PRECEDING", n),
            WindowFrameBound::Following(None) => write!(f, "UNBOUNDED FOLLOWING"),
            WindowFrameBound::Following(Some(n)) => write!(f, "{} FOLLOWING", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowFrame {
    pub unit: WindowFrameUnit,
    pub start: WindowFrameBound,
    pub end: Option<WindowFrameBound>,
}

impl WindowFrame {
    pub fn new(unit: WindowFrameUnit, start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self {
            unit,
            start,
            end: Some(end),
        }
    }

    pub fn rows(start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self::new(WindowFrameUnit::Rows, start, end)
    }

    pub fn range(start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self::new(WindowFrameUnit::Range, start, end)
    }

    pub fn groups(start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self::new(WindowFrameUnit::Groups, start, end)
    }

    /// `UNBOUNDED PRECEDING` to `UNBOUNDED FOLLOWING` in `unit`.
    pub fn unbounded(unit: WindowFrameUnit) -> Self {
        Self::new(
            unit,
            WindowFrameBound::Preceding(None),
            WindowFrameBound::Following(None),
        )
    }

    pub fn end_bound(&self) -> WindowFrameBound {
        self.end.unwrap_or(WindowFrameBound::CurrentRow)
    }
}

impl Default for WindowFrame {
    fn default() -> Self {
        Self {
            unit: WindowFrameUnit::Range,
            start: WindowFrameBound::Preceding(None),
            end: Some(WindowFrameBound::CurrentRow),
        }
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} BETWEEN {} AND {}",
            self.unit,
            self.start,
            self.end_bound()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFunction {
    FirstValue,
    LastValue,
    NthValue(i64),
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowFunction::FirstValue => write!(f, "FIRST_VALUE"),
            WindowFunction::LastValue => write!(f, "LAST_VALUE"),
            WindowFunction::NthValue(n) => write!(f, "NTH_VALUE({})", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFunctionCall {
    pub function: WindowFunction,
    /// Input column the function reads from.
    pub argument: usize,
    pub frame: Option<WindowFrame>,
    pub output_name: String,
}

impl WindowFunctionCall {
    pub fn new(function: WindowFunction, argument: usize, output_name: impl Into<String>) -> Self {
        Self {
            function,
            argument,
            frame: None,
            output_name: output_name.into(),
        }
    }

    pub fn first_value(argument: usize, output_name: impl Into<String>) -> Self {
        Self::new(WindowFunction::FirstValue, argument, output_name)
    }

    pub fn last_value(argument: usize, output_name: impl Into<String>) -> Self {
        Self::new(WindowFunction::LastValue, argument, output_name)
    }

    pub fn nth_value(argument: usize, n: i64, output_name: impl Into<String>) -> Self {
        Self::new(WindowFunction::NthValue(n), argument, output_name)
    }

    pub fn with_frame(mut self, frame: WindowFrame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn effective_frame(&self) -> WindowFrame {
        self.frame.clone().unwrap_or_default()
    }
}
