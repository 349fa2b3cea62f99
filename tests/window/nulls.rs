use sqlwindow::WindowFrameBound::{CurrentRow, Following, Preceding};
use sqlwindow::{
    DataType, SortExpr, WindowFrame, WindowFunctionCall, WindowSettings, WindowSpec,
};

use crate::common::*;

fn keyed(keys: &[Option<i64>]) -> sqlwindow::Table {
    let labels = ["a", "b", "c", "d", "e", "f"];
    let rows = keys
        .iter()
        .zip(labels)
        .map(|(k, v)| row![*k, v])
        .collect();
    sqlwindow::Table::from_values(schema(&[("k", DataType::Int64), ("v", DataType::String)]), rows)
        .unwrap()
}

#[test]
fn test_null_partition_keys_form_one_partition() {
    let spec = WindowSpec::new(vec![ORDERSTATUS], vec![]);
    let call = WindowFunctionCall::last_value(ORDERKEY, "last_key")
        .with_frame(WindowFrame::rows(Preceding(None), Following(None)));
    let result = run(orders_with_nulls(), &spec, &[call]);

    assert_column_eq!(result, RESULT, [NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL]);

    let call = WindowFunctionCall::first_value(ORDERKEY, "first_key")
        .with_frame(WindowFrame::rows(Preceding(None), Following(None)));
    let result = run(orders_with_nulls(), &spec, &[call]);

    assert_column_eq!(result, RESULT, [3, 3, 3, 3, 34, 34, 1, 1, 1, 1]);
}

#[test]
fn test_range_offset_null_key_uses_null_peers() {
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let frame = WindowFrame::range(Preceding(Some(1)), Following(Some(1)));
    let calls = [
        WindowFunctionCall::first_value(1, "first").with_frame(frame.clone()),
        WindowFunctionCall::last_value(1, "last").with_frame(frame),
    ];
    let result = run(keyed(&[Some(1), Some(2), None, None]), &spec, &calls);

    assert_column_eq!(result, 2, ["a", "a", "c", "c"]);
    assert_column_eq!(result, 3, ["b", "b", "d", "d"]);
}

#[test]
fn test_range_offset_nulls_first() {
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0).nulls_first()]);
    let call = WindowFunctionCall::first_value(1, "first")
        .with_frame(WindowFrame::range(Preceding(Some(1)), CurrentRow));
    let result = run(keyed(&[None, None, Some(1), Some(2)]), &spec, &[call]);

    assert_column_eq!(result, 2, ["a", "a", "c", "c"]);
}

#[test]
fn test_default_nulls_first_setting() {
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let call = WindowFunctionCall::first_value(1, "first")
        .with_frame(WindowFrame::range(Preceding(Some(1)), CurrentRow));
    let settings = WindowSettings::default().with_default_nulls_first(true);
    let result = run_with(settings, keyed(&[None, Some(1), Some(2)]), &spec, &[call]);

    assert_column_eq!(result, 2, ["a", "b", "b"]);
}

#[test]
fn test_explicit_nulls_last_overrides_setting() {
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0).nulls_last()]);
    let call = WindowFunctionCall::last_value(1, "last")
        .with_frame(WindowFrame::range(CurrentRow, Following(Some(5))));
    let settings = WindowSettings::default().with_default_nulls_first(true);
    let result = run_with(settings, keyed(&[Some(1), Some(2), None]), &spec, &[call]);

    assert_column_eq!(result, 2, ["b", "b", "c"]);
}

#[test]
fn test_value_functions_do_not_skip_nulls() {
    let spec = WindowSpec::new(vec![], vec![SortExpr::asc(0)]);
    let page = table!(
        [("k", DataType::Int64), ("v", DataType::String)];
        [1, NULL],
        [2, "b"],
        [3, NULL],
    );
    let frame = WindowFrame::rows(Preceding(None), Following(None));
    let calls = [
        WindowFunctionCall::first_value(1, "first").with_frame(frame.clone()),
        WindowFunctionCall::last_value(1, "last").with_frame(frame.clone()),
        WindowFunctionCall::nth_value(1, 2, "second").with_frame(frame),
    ];
    let result = run(page, &spec, &calls);

    assert_column_eq!(result, 2, [NULL, NULL, NULL]);
    assert_column_eq!(result, 3, [NULL, NULL, NULL]);
    assert_column_eq!(result, 4, ["b", "b", "b"]);
}
