// File: crates/plot-core/src/month.rs
// Summary: Month-column normalization: text cells -> first-of-month dates.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::table::{Table, Value};

const GENERIC_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const GENERIC_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Normalize one column of month labels to `Date` cells.
///
/// Two passes, all-or-nothing per column: strict `YYYY-MM` (pinned to the
/// first of the month) first, then a small set of generic date formats. If
/// either pass types every text cell the column is rewritten (nulls stay
/// null); otherwise the table comes back untouched. Absent tables and
/// absent columns pass straight through.
pub fn parse_month(table: Option<Table>, column: &str) -> Option<Table> {
    let mut table = table?;
    let Some(idx) = table.column_index(column) else {
        return Some(table);
    };

    let parsed = column_dates(&table.rows, idx, strict_year_month)
        .or_else(|| column_dates(&table.rows, idx, generic_date));

    match parsed {
        Some(dates) => {
            for (row, date) in table.rows.iter_mut().zip(dates) {
                if let Some(cell) = row.get_mut(idx) {
                    *cell = match date {
                        Some(d) => Value::Date(d),
                        None => Value::Null,
                    };
                }
            }
        }
        None => debug!(column, "column did not normalize as months, left as loaded"),
    }

    Some(table)
}

/// Run one parser over the column. `Some` only if every text cell parses;
/// nulls are carried through, any other cell type fails the pass.
fn column_dates(
    rows: &[Vec<Value>],
    idx: usize,
    parse: fn(&str) -> Option<NaiveDate>,
) -> Option<Vec<Option<NaiveDate>>> {
    rows.iter()
        .map(|row| match row.get(idx).unwrap_or(&Value::Null) {
            Value::Null => Some(None),
            Value::Str(s) => parse(s).map(Some),
            _ => None,
        })
        .collect()
}

fn strict_year_month(text: &str) -> Option<NaiveDate> {
    let (year, month) = text.trim().split_once('-')?;
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn generic_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    for fmt in GENERIC_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }
    for fmt in GENERIC_DATETIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(stamp.date());
        }
    }
    None
}
