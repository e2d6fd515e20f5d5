// File: crates/plot-core/tests/month.rs
// Purpose: Month-column normalization passes and their fallbacks.

use chrono::NaiveDate;
use plot_core::{parse_month, Table, Value};

fn table_with(cells: Vec<Value>) -> Table {
    let mut table = Table::new(vec!["month".into(), "v".into()]);
    for (i, cell) in cells.into_iter().enumerate() {
        table.push_row(vec![cell, Value::Num(i as f64)]);
    }
    table
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn absent_table_passes_through() {
    assert!(parse_month(None, "month").is_none());
}

#[test]
fn absent_column_passes_through() {
    let table = table_with(vec![Value::Str("2024-01".into())]);
    let out = parse_month(Some(table), "tx_month").expect("table survives");
    assert_eq!(out.rows[0][0], Value::Str("2024-01".into()));
}

#[test]
fn strict_year_month_pins_first_of_month() {
    let table = table_with(vec![
        Value::Str("2024-01".into()),
        Value::Str("2024-02".into()),
    ]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0].as_date(), Some(date(2024, 1, 1)));
    assert_eq!(out.rows[1][0].as_date(), Some(date(2024, 2, 1)));
}

#[test]
fn generic_pass_keeps_the_day() {
    let table = table_with(vec![
        Value::Str("2024-01-15".into()),
        Value::Str("2024/02/20".into()),
        Value::Str("2024.03.05".into()),
        Value::Str("2024-04-01 10:30:00".into()),
    ]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0].as_date(), Some(date(2024, 1, 15)));
    assert_eq!(out.rows[1][0].as_date(), Some(date(2024, 2, 20)));
    assert_eq!(out.rows[2][0].as_date(), Some(date(2024, 3, 5)));
    assert_eq!(out.rows[3][0].as_date(), Some(date(2024, 4, 1)));
}

#[test]
fn unparseable_column_left_as_loaded() {
    let table = table_with(vec![
        Value::Str("Q1-2024".into()),
        Value::Str("Q2-2024".into()),
    ]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0], Value::Str("Q1-2024".into()));
    assert_eq!(out.rows[1][0], Value::Str("Q2-2024".into()));
}

#[test]
fn one_bad_cell_rejects_the_whole_pass() {
    let table = table_with(vec![
        Value::Str("2024-01".into()),
        Value::Str("not a month".into()),
    ]);
    let out = parse_month(Some(table), "month").expect("table survives");
    // All-or-nothing: the good cell must not be rewritten either.
    assert_eq!(out.rows[0][0], Value::Str("2024-01".into()));
}

#[test]
fn nulls_ride_along() {
    let table = table_with(vec![Value::Str("2024-01".into()), Value::Null]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0].as_date(), Some(date(2024, 1, 1)));
    assert_eq!(out.rows[1][0], Value::Null);
}

#[test]
fn numeric_cells_block_both_passes() {
    let table = table_with(vec![Value::Num(202401.0)]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0], Value::Num(202401.0));
}

#[test]
fn invalid_calendar_month_rejected() {
    let table = table_with(vec![Value::Str("2024-13".into())]);
    let out = parse_month(Some(table), "month").expect("table survives");
    assert_eq!(out.rows[0][0], Value::Str("2024-13".into()));
}

#[test]
fn normalized_months_sort_chronologically() {
    let table = table_with(vec![
        Value::Str("2024-02".into()),
        Value::Str("2023-12".into()),
        Value::Str("2024-01".into()),
    ]);
    let out = parse_month(Some(table), "month").expect("table survives");
    let mut months: Vec<Value> = out.rows.iter().map(|r| r[0].clone()).collect();
    months.sort_by(|a, b| a.compare(b));
    assert_eq!(
        months,
        vec![
            Value::Date(date(2023, 12, 1)),
            Value::Date(date(2024, 1, 1)),
            Value::Date(date(2024, 2, 1)),
        ]
    );
}
