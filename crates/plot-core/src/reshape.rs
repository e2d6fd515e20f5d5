// File: crates/plot-core/src/reshape.rs
// Summary: Long-to-wide pivot used by the stacked share chart.

use std::cmp::Ordering;

use crate::error::PlotError;
use crate::table::{Table, Value};

/// Wide grid produced by [`pivot`]: one row per index value, one column per
/// category, cells `None` where the long table had no entry.
#[derive(Debug, Clone)]
pub struct Pivot {
    pub index: Vec<Value>,
    pub categories: Vec<Value>,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Pivot a long table to a wide grid.
///
/// Index and category axes are the distinct non-null values of their
/// columns, each sorted ascending. Every (index, category) pair may occur
/// at most once; a repeat is a hard error, as is a value cell that is
/// neither numeric nor null. Rows with a null index or category are
/// dropped.
pub fn pivot(
    table: &Table,
    index_col: &str,
    cat_col: &str,
    val_col: &str,
) -> Result<Pivot, PlotError> {
    let ii = table
        .column_index(index_col)
        .ok_or_else(|| PlotError::missing_column(index_col, &table.headers))?;
    let ci = table
        .column_index(cat_col)
        .ok_or_else(|| PlotError::missing_column(cat_col, &table.headers))?;
    let vi = table
        .column_index(val_col)
        .ok_or_else(|| PlotError::missing_column(val_col, &table.headers))?;

    let index = distinct(&table.rows, ii);
    let categories = distinct(&table.rows, ci);

    let mut cells = vec![vec![None; categories.len()]; index.len()];
    let mut seen = vec![vec![false; categories.len()]; index.len()];

    for (rownum, row) in table.rows.iter().enumerate() {
        let iv = row.get(ii).unwrap_or(&Value::Null);
        let cv = row.get(ci).unwrap_or(&Value::Null);
        if iv.is_null() || cv.is_null() {
            continue;
        }
        let Ok(r) = index.binary_search_by(|probe| probe.compare(iv)) else {
            continue;
        };
        let Ok(c) = categories.binary_search_by(|probe| probe.compare(cv)) else {
            continue;
        };
        if seen[r][c] {
            return Err(PlotError::DuplicatePivotKey {
                index: iv.label(),
                category: cv.label(),
            });
        }
        seen[r][c] = true;
        cells[r][c] = match row.get(vi).unwrap_or(&Value::Null) {
            Value::Null => None,
            Value::Num(v) => Some(*v),
            other => {
                return Err(PlotError::NonNumeric {
                    column: val_col.to_string(),
                    row: rownum,
                    value: other.label(),
                })
            }
        };
    }

    Ok(Pivot {
        index,
        categories,
        cells,
    })
}

fn distinct(rows: &[Vec<Value>], idx: usize) -> Vec<Value> {
    let mut values: Vec<Value> = rows
        .iter()
        .filter_map(|row| row.get(idx))
        .filter(|v| !v.is_null())
        .cloned()
        .collect();
    values.sort_by(|a, b| a.compare(b));
    // Dedup under the same ordering the binary search uses, so keys that
    // are PartialEq-equal but compare-distinct (0.0 vs -0.0) both survive.
    values.dedup_by(|a, b| a.compare(b) == Ordering::Equal);
    values
}
