// File: crates/plot-core/src/axis.rs
// Summary: Categorical slot coordinate for the x axis plus tick-label helpers.

use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};

use crate::table::Value;

/// Most slot labels drawn on one axis before thinning kicks in.
pub const MAX_X_TICKS: usize = 24;

/// One slot per table row, slot `i` centered at coordinate `i`.
///
/// The spanned range is padded half a slot on each side so bars at the
/// edges never clip against the plot frame.
#[derive(Clone, Debug)]
pub struct SlotAxis {
    len: usize,
}

impl SlotAxis {
    pub fn new(len: usize) -> Self {
        Self { len: len.max(1) }
    }
}

impl Ranged for SlotAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let frac = ((value + 0.5) / self.len as f64).clamp(0.0, 1.0);
        limit.0 + ((limit.1 - limit.0) as f64 * frac).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max_points = hint.max_num_points();
        if max_points == 0 {
            return Vec::new();
        }
        let stride = self.len.div_ceil(max_points).max(1);
        (0..self.len).step_by(stride).map(|i| i as f64).collect()
    }

    fn range(&self) -> Range<f64> {
        -0.5..(self.len as f64 - 0.5)
    }
}

/// Tick text for each slot, in row order.
pub fn slot_labels(values: &[&Value]) -> Vec<String> {
    values.iter().map(|v| v.label()).collect()
}

/// Label lookup for the mesh formatter; coordinates between slots (or the
/// padding beyond them) produce empty labels.
pub fn slot_label(labels: &[String], coord: f64) -> String {
    let nearest = coord.round();
    if nearest < 0.0 || (coord - nearest).abs() > 1e-6 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// True when the column is dates (ignoring nulls) and has at least one.
/// Date axes get rotated tick labels since `YYYY-MM` text runs wide.
pub fn all_dates(values: &[&Value]) -> bool {
    let mut seen = false;
    for v in values {
        match v {
            Value::Date(_) => seen = true,
            Value::Null => {}
            _ => return false,
        }
    }
    seen
}
