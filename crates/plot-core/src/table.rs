// File: crates/plot-core/src/table.rs
// Summary: In-memory table model: typed cells plus the header/row container.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// One typed cell. CSV text lands here as `Num` when it parses as a float,
/// otherwise as `Str`; `Date` only ever comes out of month normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Num(f64),
    Date(NaiveDate),
    Str(String),
}

impl Value {
    /// Type a raw CSV field. Empty (after trimming) is `Null`, floats become
    /// `Num` (NaN folds into `Null`), anything else stays text.
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        if let Ok(num) = trimmed.parse::<f64>() {
            if num.is_nan() {
                return Value::Null;
            }
            return Value::Num(num);
        }
        Value::Str(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Human-facing rendering used for tick labels, legends and file names.
    pub fn label(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Num(v) => fmt_num(*v),
            Value::Date(d) => d.format("%Y-%m").to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    /// Total order over cells: nulls first, then numbers, dates, text.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Num(_) => 1,
            Value::Date(_) => 2,
            Value::Str(_) => 3,
        }
    }
}

/// Format a numeric label without float noise: integral values lose the
/// trailing `.0`, everything else is rounded to six decimals.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() || v.abs() >= 1e12 {
        return v.to_string();
    }
    let rounded = (v * 1e6).round() / 1e6;
    format!("{rounded}")
}

/// A loaded CSV table. Rows always have one cell per header.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Borrow a whole column. Short rows read as `Null` so callers never
    /// index out of bounds.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Value::Null))
                .collect(),
        )
    }
}
