use std::cmp::Ordering;

use proptest::prelude::*;
use sqlwindow::WindowFrameBound::{Following, Preceding};
use sqlwindow::{
    DataType, SortExpr, Table, Value, WindowEngine, WindowFrame, WindowFrameUnit,
    WindowFunctionCall, WindowSpec,
};

use crate::common::*;

const PART: usize = 0;
const KEY: usize = 1;
const ID: usize = 2;

type Rows = Vec<(i64, Option<i64>)>;

/// Direction and NULL placement of the single order key.
#[derive(Debug, Clone, Copy)]
struct KeyOrder {
    desc: bool,
    nulls_first: bool,
}

const ASC_NULLS_LAST: KeyOrder = KeyOrder {
    desc: false,
    nulls_first: false,
};

impl KeyOrder {
    fn compare(&self, a: Option<i64>, b: Option<i64>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) if self.nulls_first => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) if self.nulls_first => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) if self.desc => y.cmp(&x),
            (Some(x), Some(y)) => x.cmp(&y),
        }
    }

    fn sort_expr(&self) -> SortExpr {
        let expr = if self.desc {
            SortExpr::desc(KEY)
        } else {
            SortExpr::asc(KEY)
        };
        if self.nulls_first {
            expr.nulls_first()
        } else {
            expr.nulls_last()
        }
    }
}

fn arb_key_order() -> impl Strategy<Value = KeyOrder> {
    (any::<bool>(), any::<bool>()).prop_map(|(desc, nulls_first)| KeyOrder { desc, nulls_first })
}

fn arb_unit() -> impl Strategy<Value = WindowFrameUnit> {
    prop_oneof![
        Just(WindowFrameUnit::Rows),
        Just(WindowFrameUnit::Range),
        Just(WindowFrameUnit::Groups),
    ]
}

fn sorted(mut rows: Rows, order: KeyOrder) -> Rows {
    rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| order.compare(a.1, b.1)));
    rows
}

/// Rows sorted by partition, then by key under `order`; `id` is the row
/// position.
fn arb_ordered_rows() -> impl Strategy<Value = (Rows, KeyOrder)> {
    (
        prop::collection::vec((0i64..3, prop::option::of(-6i64..6)), 0..40),
        arb_key_order(),
    )
        .prop_map(|(rows, order)| (sorted(rows, order), order))
}

fn arb_rows() -> impl Strategy<Value = Rows> {
    prop::collection::vec((0i64..3, prop::option::of(-6i64..6)), 0..40)
        .prop_map(|rows| sorted(rows, ASC_NULLS_LAST))
}

fn page(rows: &[(i64, Option<i64>)]) -> Table {
    let values = rows
        .iter()
        .enumerate()
        .map(|(id, (part, key))| row![*part, *key, id as i64])
        .collect();
    Table::from_values(
        schema(&[
            ("part", DataType::Int64),
            ("key", DataType::Int64),
            ("id", DataType::Int64),
        ]),
        values,
    )
    .unwrap()
}

fn spec(order: KeyOrder) -> WindowSpec {
    WindowSpec::new(vec![PART], vec![order.sort_expr()])
}

fn evaluate(rows: &[(i64, Option<i64>)], page_size: usize, calls: &[WindowFunctionCall]) -> Vec<Table> {
    evaluate_ordered(rows, ASC_NULLS_LAST, page_size, calls)
}

fn evaluate_ordered(
    rows: &[(i64, Option<i64>)],
    order: KeyOrder,
    page_size: usize,
    calls: &[WindowFunctionCall],
) -> Vec<Table> {
    let table = page(rows);
    let pages = if rows.is_empty() {
        vec![table]
    } else {
        split_pages(&table, page_size)
    };
    WindowEngine::new()
        .execute(table_schema(), pages, &spec(order), calls)
        .unwrap()
}

fn table_schema() -> sqlwindow::Schema {
    page(&[]).schema().clone()
}

fn partition_bounds(rows: &[(i64, Option<i64>)], i: usize) -> (usize, usize) {
    let part = rows[i].0;
    let first = (0..=i).rev().take_while(|&j| rows[j].0 == part).last().unwrap_or(i);
    let last = (i..rows.len()).take_while(|&j| rows[j].0 == part).last().unwrap_or(i);
    (first, last)
}

/// Peer-group number of every row within its partition.
fn group_numbers(rows: &[(i64, Option<i64>)]) -> Vec<i64> {
    let mut groups = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let group = match i.checked_sub(1).map(|p| rows[p]) {
            Some(prev) if prev.0 != row.0 => 0,
            Some(prev) if prev.1 != row.1 => groups[i - 1] + 1,
            Some(_) => groups[i - 1],
            None => 0,
        };
        groups.push(group);
    }
    groups
}

/// Inclusive frame computed by scanning the partition.
fn naive_frame(
    rows: &[(i64, Option<i64>)],
    order: KeyOrder,
    i: usize,
    unit: WindowFrameUnit,
    preceding: i64,
    following: i64,
) -> Option<(usize, usize)> {
    let (first, last) = partition_bounds(rows, i);
    let members: Vec<usize> = match unit {
        WindowFrameUnit::Rows => (first..=last)
            .filter(|&j| {
                let offset = j as i64 - i as i64;
                -preceding <= offset && offset <= following
            })
            .collect(),
        WindowFrameUnit::Range => {
            let (below, above) = if order.desc {
                (following, preceding)
            } else {
                (preceding, following)
            };
            (first..=last)
                .filter(|&j| match (rows[i].1, rows[j].1) {
                    (None, None) => true,
                    (Some(k), Some(kj)) => k - below <= kj && kj <= k + above,
                    _ => false,
                })
                .collect()
        }
        WindowFrameUnit::Groups => {
            let groups = group_numbers(rows);
            let current = groups[i];
            (first..=last)
                .filter(|&j| current - preceding <= groups[j] && groups[j] <= current + following)
                .collect()
        }
    };
    Some((*members.first()?, *members.last()?))
}

fn ids(pages: &[Table], col: usize) -> Vec<Option<i64>> {
    column_nullable_i64(pages, col)
}

proptest! {
    #[test]
    fn prop_rows_and_order_preserved(rows in arb_rows(), page_size in 1usize..7) {
        let output = evaluate(&rows, page_size, &[WindowFunctionCall::first_value(ID, "fv")]);

        prop_assert_eq!(total_rows(&output), rows.len());
        let expected: Vec<i64> = (0..rows.len() as i64).collect();
        prop_assert_eq!(column_i64(&output, ID), expected);
    }

    #[test]
    fn prop_nth_one_is_first_value(
        rows in arb_rows(),
        page_size in 1usize..7,
        preceding in 0i64..4,
        following in 0i64..4,
    ) {
        let frame = WindowFrame::rows(Preceding(Some(preceding)), Following(Some(following)));
        let calls = [
            WindowFunctionCall::nth_value(ID, 1, "nth").with_frame(frame.clone()),
            WindowFunctionCall::first_value(ID, "first").with_frame(frame),
        ];
        let output = evaluate(&rows, page_size, &calls);

        prop_assert_eq!(ids(&output, 3), ids(&output, 4));
    }

    #[test]
    fn prop_unbounded_first_last_constant_per_partition(rows in arb_rows(), page_size in 1usize..7) {
        let frame = WindowFrame::unbounded(WindowFrameUnit::Rows);
        let calls = [
            WindowFunctionCall::first_value(ID, "first").with_frame(frame.clone()),
            WindowFunctionCall::last_value(ID, "last").with_frame(frame),
        ];
        let output = evaluate(&rows, page_size, &calls);
        let first = ids(&output, 3);
        let last = ids(&output, 4);

        for i in 0..rows.len() {
            let (p0, p1) = partition_bounds(&rows, i);
            prop_assert_eq!(first[i], Some(p0 as i64));
            prop_assert_eq!(last[i], Some(p1 as i64));
        }
    }

    #[test]
    fn prop_matches_naive_frames(
        (rows, order) in arb_ordered_rows(),
        page_size in 1usize..7,
        unit in arb_unit(),
        preceding in 0i64..4,
        following in 0i64..4,
        n in 1i64..4,
    ) {
        let frame = WindowFrame::new(unit, Preceding(Some(preceding)), Following(Some(following)));
        let calls = [
            WindowFunctionCall::first_value(ID, "first").with_frame(frame.clone()),
            WindowFunctionCall::last_value(ID, "last").with_frame(frame.clone()),
            WindowFunctionCall::nth_value(ID, n, "nth").with_frame(frame),
        ];
        let output = evaluate_ordered(&rows, order, page_size, &calls);
        let first = ids(&output, 3);
        let last = ids(&output, 4);
        let nth = ids(&output, 5);

        for i in 0..rows.len() {
            let expected = naive_frame(&rows, order, i, unit, preceding, following);
            let expected_first = expected.map(|(s, _)| s as i64);
            let expected_last = expected.map(|(_, e)| e as i64);
            let expected_nth = expected.and_then(|(s, e)| {
                let target = s + (n as usize) - 1;
                (target <= e).then_some(target as i64)
            });
            prop_assert_eq!(first[i], expected_first, "first at row {} ({:?}, {:?})", i, unit, order);
            prop_assert_eq!(last[i], expected_last, "last at row {} ({:?}, {:?})", i, unit, order);
            prop_assert_eq!(nth[i], expected_nth, "nth at row {} ({:?}, {:?})", i, unit, order);
        }
    }
}

#[test]
fn test_empty_input_produces_empty_page() {
    let output = evaluate(&[], 1, &[WindowFunctionCall::first_value(ID, "fv")]);

    assert_eq!(page_sizes(&output), vec![0]);
    assert_eq!(output[0].num_columns(), 4);
    assert!(column_values(&output, 3).iter().all(Value::is_null));
}
