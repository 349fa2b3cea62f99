//! Frame resolution: turns a frame clause and the current row into an
//! inclusive, partition-local row range.

mod cursor;
mod offset;

pub use cursor::FrameCursor;
use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;
use sqlwindow_ir::{WindowFrame, WindowFrameBound, WindowFrameUnit};
use sqlwindow_storage::{Column, Schema};
use tracing::trace;

use crate::ordering::{OrderComparator, SortKey};

/// Inclusive row range within a partition. `end < start` is an empty frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFrame {
    pub start: usize,
    pub end: usize,
}

impl ResolvedFrame {
    pub const EMPTY: ResolvedFrame = ResolvedFrame { start: 1, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Clamps signed bounds into a partition of `rows` rows.
    pub fn clamped(start: i64, end: i64, rows: usize) -> Self {
        let last = rows as i64 - 1;
        if rows == 0 || start > end || start > last || end < 0 {
            return Self::EMPTY;
        }
        Self {
            start: start.max(0) as usize,
            end: end.min(last) as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }
}

/// The buffered partition as seen by the resolver.
#[derive(Clone, Copy)]
pub struct PartitionView<'a> {
    pub columns: &'a [Column],
    pub order: &'a OrderComparator,
    pub rows: usize,
}

impl<'a> PartitionView<'a> {
    pub fn new(columns: &'a [Column], order: &'a OrderComparator, rows: usize) -> Self {
        Self {
            columns,
            order,
            rows,
        }
    }

    pub fn value(&self, column: usize, row: usize) -> Value {
        self.columns
            .get(column)
            .map(|c| c.get_value(row))
            .unwrap_or(Value::Null)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

/// A validated frame clause plus the cursor it resolves with.
#[derive(Debug, Clone)]
pub struct FrameResolver {
    unit: WindowFrameUnit,
    start: WindowFrameBound,
    end: WindowFrameBound,
    range_key: Option<SortKey>,
    cursor: FrameCursor,
}

impl FrameResolver {
    pub fn try_new(frame: &WindowFrame, order: &OrderComparator, schema: &Schema) -> Result<Self> {
        let range_key = validate_frame(frame, order, schema)?;
        Ok(Self {
            unit: frame.unit,
            start: frame.start,
            end: frame.end_bound(),
            range_key,
            cursor: FrameCursor::new(),
        })
    }

    pub fn unit(&self) -> WindowFrameUnit {
        self.unit
    }

    pub fn cursor(&self) -> &FrameCursor {
        &self.cursor
    }

    pub fn begin_partition(&mut self) {
        self.cursor.reset();
    }

    /// Resolves the frame of `row`. Rows of a partition must be resolved in
    /// ascending order after `begin_partition`.
    pub fn resolve(&mut self, view: &PartitionView<'_>, row: usize) -> Result<ResolvedFrame> {
        self.cursor.advance_to(view, row);
        let (start_bound, end_bound) = (self.start, self.end);
        let start = self.resolve_bound(view, row, start_bound, Side::Start)?;
        let end = self.resolve_bound(view, row, end_bound, Side::End)?;
        let frame = ResolvedFrame::clamped(start, end, view.rows);
        trace!(row, start, end, empty = frame.is_empty(), "resolved frame");
        Ok(frame)
    }

    fn resolve_bound(
        &mut self,
        view: &PartitionView<'_>,
        row: usize,
        bound: WindowFrameBound,
        side: Side,
    ) -> Result<i64> {
        let last = view.rows as i64 - 1;
        let current = row as i64;
        match bound {
            WindowFrameBound::Preceding(None) => Ok(0),
            WindowFrameBound::Following(None) => Ok(last),
            WindowFrameBound::CurrentRow => Ok(match self.unit {
                WindowFrameUnit::Rows => current,
                WindowFrameUnit::Range | WindowFrameUnit::Groups => self.peer_bound(view, side),
            }),
            WindowFrameBound::Preceding(Some(n)) | WindowFrameBound::Following(Some(n)) => {
                let preceding = matches!(bound, WindowFrameBound::Preceding(_));
                match self.unit {
                    WindowFrameUnit::Rows => Ok(if preceding {
                        current.saturating_sub(n)
                    } else {
                        current.saturating_add(n)
                    }),
                    WindowFrameUnit::Range => self.range_offset(view, row, n, preceding, side),
                    WindowFrameUnit::Groups => Ok(self.groups_offset(view, n, preceding, side)),
                }
            }
        }
    }

    fn peer_bound(&mut self, view: &PartitionView<'_>, side: Side) -> i64 {
        let (first, last) = self.cursor.peer_group(view);
        match side {
            Side::Start => first as i64,
            Side::End => last as i64,
        }
    }

    fn range_offset(
        &mut self,
        view: &PartitionView<'_>,
        row: usize,
        n: i64,
        preceding: bool,
        side: Side,
    ) -> Result<i64> {
        let key = self
            .range_key
            .ok_or_else(|| Error::internal("RANGE offset without an ORDER BY key"))?;
        let value = view.value(key.column, row);
        if value.is_null() {
            return Ok(self.peer_bound(view, side));
        }
        let backwards = preceding == key.asc;
        let target = offset::shift_value(&value, n, backwards)?;
        Ok(match side {
            Side::Start => self.cursor.seek_range_start(view, &key, &target) as i64,
            Side::End => self.cursor.seek_range_end(view, &key, &target) as i64 - 1,
        })
    }

    fn groups_offset(&mut self, view: &PartitionView<'_>, n: i64, preceding: bool, side: Side) -> i64 {
        let current = self.cursor.current_group() as i64;
        let group = if preceding {
            current.saturating_sub(n)
        } else {
            current.saturating_add(n)
        };
        if group < 0 {
            return match side {
                Side::Start => 0,
                Side::End => -1,
            };
        }
        let group = usize::try_from(group).unwrap_or(usize::MAX);
        match side {
            Side::Start => self
                .cursor
                .group_start(view, group)
                .map(|row| row as i64)
                .unwrap_or(view.rows as i64),
            Side::End => self
                .cursor
                .group_end(view, group)
                .map(|row| row as i64)
                .unwrap_or(view.rows as i64 - 1),
        }
    }
}

/// Checks bound values, bound combinations and RANGE key requirements.
/// Returns the sort key RANGE offsets are measured on, if any.
pub fn validate_frame(
    frame: &WindowFrame,
    order: &OrderComparator,
    schema: &Schema,
) -> Result<Option<SortKey>> {
    let start = frame.start;
    let end = frame.end_bound();

    for bound in [start, end] {
        if let Some(n) = bound.offset()
            && n < 0
        {
            return Err(Error::invalid_frame_bound(format!(
                "frame offset must be non-negative, got {}",
                n
            )));
        }
    }

    match (start, end) {
        (WindowFrameBound::Following(None), _) => {
            return Err(Error::invalid_frame_bound(
                "frame start cannot be UNBOUNDED FOLLOWING",
            ));
        }
        (_, WindowFrameBound::Preceding(None)) => {
            return Err(Error::invalid_frame_bound(
                "frame end cannot be UNBOUNDED PRECEDING",
            ));
        }
        (WindowFrameBound::CurrentRow, WindowFrameBound::Preceding(Some(_))) => {
            return Err(Error::invalid_frame_bound(
                "frame starting from current row cannot have preceding rows",
            ));
        }
        (
            WindowFrameBound::Following(Some(_)),
            WindowFrameBound::Preceding(Some(_)) | WindowFrameBound::CurrentRow,
        ) => {
            return Err(Error::invalid_frame_bound(
                "frame starting from following row cannot end with current row or preceding rows",
            ));
        }
        _ => {}
    }

    let has_offset = start.offset().is_some() || end.offset().is_some();
    match frame.unit {
        WindowFrameUnit::Rows => Ok(None),
        WindowFrameUnit::Groups => {
            if order.is_empty() {
                return Err(Error::invalid_frame_bound("GROUPS frame requires ORDER BY"));
            }
            Ok(None)
        }
        WindowFrameUnit::Range if !has_offset => Ok(None),
        WindowFrameUnit::Range => {
            let [key] = order.keys() else {
                return Err(Error::invalid_frame_bound(
                    "RANGE with offset PRECEDING/FOLLOWING requires exactly one ORDER BY column",
                ));
            };
            let data_type = schema.field_at(key.column)?.data_type;
            if !data_type.supports_range_offset() {
                return Err(Error::unsupported_range_type(format!(
                    "RANGE offset is not supported for {} ORDER BY column",
                    data_type
                )));
            }
            Ok(Some(*key))
        }
    }
}
