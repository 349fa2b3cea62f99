use std::cmp::Ordering;

use sqlwindow_common::types::Value;
use sqlwindow_ir::SortExpr;
use sqlwindow_storage::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub asc: bool,
    pub nulls_first: bool,
}

/// Total order over the `ORDER BY` keys of a window. Two rows are peers when
/// every key compares equal; direction never affects equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderComparator {
    keys: Vec<SortKey>,
}

impl OrderComparator {
    pub fn new(order_by: &[SortExpr], default_nulls_first: bool) -> Self {
        let keys = order_by
            .iter()
            .map(|expr| SortKey {
                column: expr.column,
                asc: expr.asc,
                nulls_first: expr.nulls_first.unwrap_or(default_nulls_first),
            })
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare_rows(&self, columns: &[Column], a: usize, b: usize) -> Ordering {
        for key in &self.keys {
            let column = &columns[key.column];
            let ordering = compare_with_key(key, &column.get_value(a), &column.get_value(b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    pub fn is_peer(&self, columns: &[Column], a: usize, b: usize) -> bool {
        self.compare_rows(columns, a, b) == Ordering::Equal
    }
}

/// Compares two values of one sort key, honoring direction and null
/// placement.
pub fn compare_with_key(key: &SortKey, a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if key.nulls_first {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if key.nulls_first {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let ordering = a.cmp(b);
            if key.asc { ordering } else { ordering.reverse() }
        }
    }
}
