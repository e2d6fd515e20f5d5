// File: crates/plot-core/src/chart.rs
// Summary: Chart renderers: line, bar, and stacked share bars to PNG files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::chart::SeriesLabelPosition;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::info;

use crate::axis::{all_dates, slot_label, slot_labels, SlotAxis, MAX_X_TICKS};
use crate::error::PlotError;
use crate::reshape;
use crate::table::{fmt_num, Table, Value};
use crate::theme::Theme;

const Y_LABEL_AREA: u32 = 64;
const BAR_HALF_WIDTH: f64 = 0.35;

/// Output surface settings shared by every renderer.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 640,
            theme: Theme::light(),
        }
    }
}

/// Connected line of (slot, y) in row order. Null y cells drop out of the
/// polyline; a non-numeric y cell is fatal.
pub fn render_line(
    table: &Table,
    x: &str,
    y: &str,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<()> {
    if table.is_empty() {
        info!(chart = %title, "no rows, chart skipped");
        return Ok(());
    }
    let xs = table
        .column(x)
        .ok_or_else(|| PlotError::missing_column(x, &table.headers))?;
    let ys = numeric_column(table, y)?;
    let labels = slot_labels(&xs);
    let rotate = all_dates(&xs);
    let (y_lo, y_hi) = value_range(&ys, false);

    ensure_parent(out_path)?;
    let root = BitMapBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&opts.theme.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font().color(&opts.theme.title))
        .margin(12)
        .x_label_area_size(x_label_area(rotate))
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(SlotAxis::new(table.len()), y_lo..y_hi)?;

    configure_slot_mesh(&mut chart, &labels, rotate, x, y, &opts.theme)?;

    let points: Vec<(f64, f64)> = ys
        .iter()
        .enumerate()
        .filter_map(|(slot, v)| v.map(|v| (slot as f64, v)))
        .collect();
    chart.draw_series(LineSeries::new(
        points,
        opts.theme.line_stroke.stroke_width(2),
    ))?;

    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!(path = %out_path.display(), "chart written");
    Ok(())
}

/// One vertical bar per row, from baseline 0 to y. Null y cells leave an
/// empty slot; a non-numeric y cell is fatal.
pub fn render_bar(
    table: &Table,
    x: &str,
    y: &str,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<()> {
    if table.is_empty() {
        info!(chart = %title, "no rows, chart skipped");
        return Ok(());
    }
    let xs = table
        .column(x)
        .ok_or_else(|| PlotError::missing_column(x, &table.headers))?;
    let ys = numeric_column(table, y)?;
    let labels = slot_labels(&xs);
    let rotate = all_dates(&xs);
    let (y_lo, y_hi) = value_range(&ys, true);

    ensure_parent(out_path)?;
    let root = BitMapBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&opts.theme.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font().color(&opts.theme.title))
        .margin(12)
        .x_label_area_size(x_label_area(rotate))
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(SlotAxis::new(table.len()), y_lo..y_hi)?;

    configure_slot_mesh(&mut chart, &labels, rotate, x, y, &opts.theme)?;

    chart.draw_series(ys.iter().enumerate().filter_map(|(slot, v)| {
        v.map(|v| {
            let center = slot as f64;
            // Corner order matters to the rasterizer, so negative bars hang
            // below the baseline with the corners swapped.
            let (y0, y1) = if v < 0.0 { (v, 0.0) } else { (0.0, v) };
            Rectangle::new(
                [(center - BAR_HALF_WIDTH, y0), (center + BAR_HALF_WIDTH, y1)],
                opts.theme.bar_fill.filled(),
            )
        })
    }))?;

    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!(path = %out_path.display(), "chart written");
    Ok(())
}

/// Stacked bars from a long (index, category, value) table: one segment per
/// category stacked over the running sum of the earlier ones. A missing
/// index-category pair draws nothing and leaves the running sum alone.
pub fn render_stacked_shares(
    table: &Table,
    index_col: &str,
    cat_col: &str,
    val_col: &str,
    title: &str,
    out_path: &Path,
    opts: &RenderOptions,
) -> Result<()> {
    if table.is_empty() {
        info!(chart = %title, "no rows, chart skipped");
        return Ok(());
    }
    let wide = reshape::pivot(table, index_col, cat_col, val_col)?;
    let xs: Vec<&Value> = wide.index.iter().collect();
    let labels = slot_labels(&xs);
    let rotate = all_dates(&xs);
    let slots = wide.index.len();

    let mut top = 0.0_f64;
    for row in &wide.cells {
        let total: f64 = row.iter().flatten().sum();
        top = top.max(total);
    }
    let (y_lo, y_hi) = pad_range(0.0, top);

    ensure_parent(out_path)?;
    let root = BitMapBackend::new(out_path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&opts.theme.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font().color(&opts.theme.title))
        .margin(12)
        .x_label_area_size(x_label_area(rotate))
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(SlotAxis::new(slots), y_lo..y_hi)?;

    configure_slot_mesh(&mut chart, &labels, rotate, index_col, val_col, &opts.theme)?;

    let mut baseline = vec![0.0_f64; slots];
    for (c, category) in wide.categories.iter().enumerate() {
        let color = opts.theme.stack_color(c);
        let segments: Vec<Rectangle<(f64, f64)>> = (0..slots)
            .filter_map(|slot| {
                wide.cells[slot][c].map(|v| {
                    let center = slot as f64;
                    Rectangle::new(
                        [
                            (center - BAR_HALF_WIDTH, baseline[slot]),
                            (center + BAR_HALF_WIDTH, baseline[slot] + v),
                        ],
                        color.filled(),
                    )
                })
            })
            .collect();
        for (slot, base) in baseline.iter_mut().enumerate() {
            if let Some(v) = wide.cells[slot][c] {
                *base += v;
            }
        }
        chart
            .draw_series(segments)?
            .label(category.label())
            .legend(move |(lx, ly)| {
                Rectangle::new([(lx, ly - 5), (lx + 10, ly + 5)], color.filled())
            });
    }

    if !wide.categories.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&opts.theme.background.mix(0.85))
            .border_style(&opts.theme.grid)
            .label_font(tick_style(&opts.theme, false))
            .draw()?;
    }

    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    info!(path = %out_path.display(), "chart written");
    Ok(())
}

fn configure_slot_mesh(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<SlotAxis, RangedCoordf64>>,
    labels: &[String],
    rotate: bool,
    x_desc: &str,
    y_desc: &str,
    theme: &Theme,
) -> Result<()> {
    chart
        .configure_mesh()
        .light_line_style(&theme.grid.mix(0.35))
        .bold_line_style(&theme.grid)
        .axis_style(&theme.axis_line)
        .x_labels(labels.len().clamp(1, MAX_X_TICKS))
        .x_label_style(tick_style(theme, rotate))
        .y_label_style(tick_style(theme, false))
        .x_label_formatter(&|coord| slot_label(labels, *coord))
        .y_label_formatter(&|v| fmt_num(*v))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15).into_font().color(&theme.axis_label))
        .draw()?;
    Ok(())
}

/// Column of y values, `Null` as gaps. Anything else non-numeric is fatal.
fn numeric_column(table: &Table, name: &str) -> Result<Vec<Option<f64>>> {
    let column = table
        .column(name)
        .ok_or_else(|| PlotError::missing_column(name, &table.headers))?;
    column
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Value::Null => Ok(None),
            Value::Num(v) => Ok(Some(*v)),
            other => Err(PlotError::NonNumeric {
                column: name.to_string(),
                row,
                value: other.label(),
            }
            .into()),
        })
        .collect()
}

fn value_range(values: &[Option<f64>], include_zero: bool) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.iter().flatten() {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    pad_range(lo, hi)
}

/// Expand a raw min/max to drawable axis bounds; degenerate spans widen to
/// a unit window.
fn pad_range(lo: f64, hi: f64) -> (f64, f64) {
    let (lo, hi) = if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    };
    let margin = (hi - lo) * 0.04;
    (lo - margin, hi + margin)
}

fn x_label_area(rotate: bool) -> u32 {
    if rotate {
        72
    } else {
        44
    }
}

fn tick_style(theme: &Theme, rotate: bool) -> TextStyle<'static> {
    let font = ("sans-serif", 13).into_font();
    let font = if rotate {
        font.transform(FontTransform::Rotate90)
    } else {
        font
    };
    font.color(&theme.axis_label)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
