use std::cmp::Ordering;

use sqlwindow_common::types::Value;

use super::PartitionView;
use crate::ordering::{SortKey, compare_with_key};

/// Per-partition scan state carried from one row to the next.
///
/// Peer groups are discovered lazily as rows are visited or as GROUPS
/// offsets look ahead. The two RANGE pointers only ever move forward, which
/// keeps offset resolution amortized O(1) per row.
#[derive(Debug, Default, Clone)]
pub struct FrameCursor {
    group_starts: Vec<usize>,
    scanned: usize,
    current_group: usize,
    range_start: usize,
    range_end: usize,
}

impl FrameCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.group_starts.clear();
        self.scanned = 0;
        self.current_group = 0;
        self.range_start = 0;
        self.range_end = 0;
    }

    /// Moves to `row`. Rows must be visited in non-decreasing order within a
    /// partition.
    pub fn advance_to(&mut self, view: &PartitionView<'_>, row: usize) {
        self.discover_through(view, row);
        while self.current_group + 1 < self.group_starts.len()
            && self.group_starts[self.current_group + 1] <= row
        {
            self.current_group += 1;
        }
    }

    pub fn current_group(&self) -> usize {
        self.current_group
    }

    /// Inclusive bounds of the current row's peer group.
    pub fn peer_group(&mut self, view: &PartitionView<'_>) -> (usize, usize) {
        let group = self.current_group;
        let start = self.group_start(view, group).unwrap_or(0);
        let end = self
            .group_end(view, group)
            .unwrap_or(view.rows.saturating_sub(1));
        (start, end)
    }

    /// First row of peer group `group`, or `None` past the last group.
    pub fn group_start(&mut self, view: &PartitionView<'_>, group: usize) -> Option<usize> {
        while self.group_starts.len() <= group && self.scanned < view.rows {
            self.discover_through(view, self.scanned);
        }
        self.group_starts.get(group).copied()
    }

    /// Last row of peer group `group`, or `None` past the last group.
    pub fn group_end(&mut self, view: &PartitionView<'_>, group: usize) -> Option<usize> {
        let next = group.saturating_add(1);
        while self.group_starts.len() <= next && self.scanned < view.rows {
            self.discover_through(view, self.scanned);
        }
        if let Some(&next_start) = self.group_starts.get(next) {
            Some(next_start - 1)
        } else if group < self.group_starts.len() {
            Some(view.rows - 1)
        } else {
            None
        }
    }

    /// First row whose key sorts at or after `target`.
    pub fn seek_range_start(
        &mut self,
        view: &PartitionView<'_>,
        key: &SortKey,
        target: &Value,
    ) -> usize {
        while self.range_start < view.rows
            && compare_with_key(key, &view.value(key.column, self.range_start), target)
                == Ordering::Less
        {
            self.range_start += 1;
        }
        self.range_start
    }

    /// Number of leading rows whose key sorts at or before `target`.
    pub fn seek_range_end(
        &mut self,
        view: &PartitionView<'_>,
        key: &SortKey,
        target: &Value,
    ) -> usize {
        while self.range_end < view.rows
            && compare_with_key(key, &view.value(key.column, self.range_end), target)
                != Ordering::Greater
        {
            self.range_end += 1;
        }
        self.range_end
    }

    fn discover_through(&mut self, view: &PartitionView<'_>, row: usize) {
        while self.scanned <= row && self.scanned < view.rows {
            let i = self.scanned;
            if i == 0 || !view.order.is_peer(view.columns, i - 1, i) {
                self.group_starts.push(i);
            }
            self.scanned += 1;
        }
    }
}
