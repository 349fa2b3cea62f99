use rust_decimal::Decimal;
use sqlwindow::WindowFrameBound::{CurrentRow, Following, Preceding};
use sqlwindow::{
    DataType, SortExpr, Value, WindowFrame, WindowFrameUnit, WindowFunctionCall, WindowSpec,
};

use crate::common::*;

fn first_v() -> WindowFunctionCall {
    WindowFunctionCall::first_value(LADDER_V, "out")
}

fn last_v() -> WindowFunctionCall {
    WindowFunctionCall::last_value(LADDER_V, "out")
}

#[test]
fn test_rows_shorthand_ends_at_current_row() {
    let frame = WindowFrame {
        unit: WindowFrameUnit::Rows,
        start: Preceding(Some(1)),
        end: None,
    };
    let result = run_ladder(first_v(), frame);

    assert_column_eq!(result, LADDER_RESULT, ["a", "a", "b", "c", "d", "e", "f", "g"]);
}

#[test]
fn test_rows_following_window() {
    let result = run_ladder(
        first_v(),
        WindowFrame::rows(Following(Some(3)), Following(Some(5))),
    );

    assert_column_eq!(
        result,
        LADDER_RESULT,
        ["d", "e", "f", "g", "h", NULL, NULL, NULL]
    );
}

#[test]
fn test_rows_huge_offsets_clamp() {
    let result = run_ladder(
        last_v(),
        WindowFrame::rows(Preceding(Some(i64::MAX)), Following(Some(i64::MAX))),
    );

    assert_column_eq!(
        result,
        LADDER_RESULT,
        ["h", "h", "h", "h", "h", "h", "h", "h"]
    );
}

#[test]
fn test_range_current_row_is_peer_group() {
    let result = run_ladder(last_v(), WindowFrame::range(CurrentRow, CurrentRow));

    assert_column_eq!(result, LADDER_RESULT, ["a", "c", "c", "d", "e", "g", "g", "h"]);
}

#[test]
fn test_range_default_frame_ends_at_last_peer() {
    let result = run(ladder(), &ladder_spec(), &[last_v()]);

    assert_column_eq!(result, LADDER_RESULT, ["a", "c", "c", "d", "e", "g", "g", "h"]);
}

#[test]
fn test_range_preceding_offset() {
    let result = run_ladder(first_v(), WindowFrame::range(Preceding(Some(2)), CurrentRow));

    assert_column_eq!(result, LADDER_RESULT, ["a", "a", "a", "a", "d", "f", "f", "h"]);
}

#[test]
fn test_range_following_offset() {
    let result = run_ladder(last_v(), WindowFrame::range(CurrentRow, Following(Some(2))));

    assert_column_eq!(result, LADDER_RESULT, ["d", "d", "d", "e", "e", "g", "g", "h"]);
}

#[test]
fn test_range_following_only_can_be_empty() {
    let result = run_ladder(
        first_v(),
        WindowFrame::range(Following(Some(1)), Following(Some(3))),
    );

    assert_column_eq!(
        result,
        LADDER_RESULT,
        ["b", "d", "d", "e", "f", NULL, NULL, NULL]
    );
}

#[test]
fn test_range_descending_order() {
    let page = table!(
        [("x", DataType::Int64), ("v", DataType::String)];
        [13, "h"],
        [8, "g"],
        [8, "f"],
        [5, "e"],
        [3, "d"],
        [2, "c"],
        [2, "b"],
        [1, "a"],
    );
    let spec = WindowSpec::new(vec![], vec![SortExpr::desc(LADDER_X)]);
    let call = first_v().with_frame(WindowFrame::range(Preceding(Some(2)), CurrentRow));
    let result = run(page, &spec, &[call]);

    assert_column_eq!(result, LADDER_RESULT, ["h", "g", "g", "e", "e", "d", "d", "d"]);
}

#[test]
fn test_groups_one_around() {
    let frame = WindowFrame::groups(Preceding(Some(1)), Following(Some(1)));

    let first = run_ladder(first_v(), frame.clone());
    assert_column_eq!(first, LADDER_RESULT, ["a", "a", "a", "b", "d", "e", "e", "f"]);

    let last = run_ladder(last_v(), frame);
    assert_column_eq!(last, LADDER_RESULT, ["c", "c", "c", "d", "e", "g", "g", "h"]);
}

#[test]
fn test_groups_preceding_only() {
    let result = run_ladder(
        last_v(),
        WindowFrame::groups(Preceding(Some(2)), Preceding(Some(1))),
    );

    assert_column_eq!(
        result,
        LADDER_RESULT,
        [NULL, "a", "a", "c", "d", "e", "e", "g"]
    );
}

#[test]
fn test_groups_current_row_matches_range_current_row() {
    let groups = run_ladder(last_v(), WindowFrame::groups(CurrentRow, CurrentRow));
    let range = run_ladder(last_v(), WindowFrame::range(CurrentRow, CurrentRow));

    assert_eq!(
        column_values(&groups, LADDER_RESULT),
        column_values(&range, LADDER_RESULT)
    );
}

#[test]
fn test_range_float_key() {
    let page = table!(
        [("x", DataType::Float64)];
        [0.5],
        [1.0],
        [1.7],
        [3.0],
    );
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let call = WindowFunctionCall::first_value(0, "out")
        .with_frame(WindowFrame::range(Preceding(Some(1)), CurrentRow));
    let result = run(page, &spec, &[call]);

    assert_column_eq!(result, 1, [0.5, 0.5, 1.0, 3.0]);
}

#[test]
fn test_range_numeric_key() {
    let page = table!(
        [("x", DataType::Numeric)];
        [Decimal::new(150, 2)],
        [Decimal::new(300, 2)],
        [Decimal::new(325, 2)],
        [Decimal::new(700, 2)],
    );
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let call = WindowFunctionCall::last_value(0, "out")
        .with_frame(WindowFrame::range(CurrentRow, Following(Some(2))));
    let result = run(page, &spec, &[call]);

    assert_column_eq!(
        result,
        1,
        [
            Decimal::new(325, 2),
            Decimal::new(325, 2),
            Decimal::new(325, 2),
            Decimal::new(700, 2),
        ]
    );
}

#[test]
fn test_range_date_key_counts_days() {
    let page = table!(
        [("d", DataType::Date)];
        [date("2024-01-01")],
        [date("2024-01-02")],
        [date("2024-01-05")],
        [date("2024-01-06")],
    );
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let call = WindowFunctionCall::first_value(0, "out")
        .with_frame(WindowFrame::range(Preceding(Some(3)), CurrentRow));
    let result = run(page, &spec, &[call]);

    assert_column_eq!(
        result,
        1,
        [
            date("2024-01-01"),
            date("2024-01-01"),
            date("2024-01-02"),
            date("2024-01-05"),
        ]
    );
}

#[test]
fn test_range_offset_saturates_at_int64_limits() {
    let page = table!(
        [("x", DataType::Int64)];
        [i64::MIN],
        [i64::MIN + 1],
        [i64::MAX - 1],
        [i64::MAX],
    );
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let calls = [
        WindowFunctionCall::first_value(0, "first")
            .with_frame(WindowFrame::range(Preceding(Some(5)), CurrentRow)),
        WindowFunctionCall::last_value(0, "last")
            .with_frame(WindowFrame::range(CurrentRow, Following(Some(5)))),
    ];
    let result = run(page, &spec, &calls);

    assert_column_eq!(result, 1, [i64::MIN, i64::MIN, i64::MAX - 1, i64::MAX - 1]);
    assert_column_eq!(result, 2, [i64::MIN + 1, i64::MIN + 1, i64::MAX, i64::MAX]);
}

#[test]
fn test_frames_are_independent_per_call() {
    let calls = [
        first_v().with_frame(WindowFrame::rows(Preceding(Some(1)), CurrentRow)),
        last_v().with_frame(WindowFrame::groups(CurrentRow, Following(Some(1)))),
        WindowFunctionCall::nth_value(LADDER_X, 2, "nth")
            .with_frame(WindowFrame::unbounded(WindowFrameUnit::Range)),
    ];
    let result = run(ladder(), &ladder_spec(), &calls);

    assert_column_eq!(result, 2, ["a", "a", "b", "c", "d", "e", "f", "g"]);
    assert_column_eq!(result, 3, ["c", "d", "d", "e", "g", "h", "h", "h"]);
    assert_column_eq!(result, 4, [2, 2, 2, 2, 2, 2, 2, 2]);
    assert_eq!(
        result[0].schema().field_at(4).unwrap().data_type,
        DataType::Int64
    );
    assert_eq!(column_values(&result, 4)[0], Value::int64(2));
}
