// File: crates/portfolio-plots/src/report.rs
// Summary: The report run: load the fixed CSV exports, render every chart.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plot_core::{
    load_csv, parse_month, render_bar, render_line, render_stacked_shares, PlotError,
    RenderOptions, Table, Value,
};
use tracing::info;

/// Vintage curves are capped so a long-running portfolio cannot flood the
/// output directory; the earliest cohorts are the ones kept.
const MAX_VINTAGE_COHORTS: usize = 8;

/// Render the whole portfolio report from `data_dir` into `out_dir`.
///
/// Absent input tables are skipped with a warning; anything structurally
/// wrong inside a present table (missing referenced column, duplicate pivot
/// entry, non-numeric measure) aborts the run. Charts already written stay
/// on disk.
pub fn run(data_dir: &Path, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let opts = RenderOptions::default();

    let new_customers = parse_month(
        load_csv(
            &data_dir.join("new_customers_by_month.csv"),
            &["month", "new_customers"],
        )?,
        "month",
    );
    let active_customers = parse_month(
        load_csv(
            &data_dir.join("active_customers_by_month.csv"),
            &["month", "active_customers"],
        )?,
        "month",
    );
    let tx_volume = parse_month(
        load_csv(
            &data_dir.join("transactions_volume_by_month.csv"),
            &["month", "tx_count", "tx_amount"],
        )?,
        "month",
    );
    let installments = parse_month(
        load_csv(
            &data_dir.join("installments_breakdown_by_month.csv"),
            &["month", "installments_count", "share_pct"],
        )?,
        "month",
    );
    // The category-mix tables ship in the same export; loading them keeps
    // schema drift visible in the warnings even though no chart reads them.
    let _merchant_categories = parse_month(
        load_csv(
            &data_dir.join("merchant_categories_by_month.csv"),
            &["month", "category", "tx_cnt"],
        )?,
        "month",
    );
    let _merchant_top3 = parse_month(
        load_csv(&data_dir.join("merchant_categories_top3_by_month.csv"), &[])?,
        "month",
    );

    let dpd_age = load_csv(
        &data_dir.join("dpd90_by_age_band.csv"),
        &["age_band", "dpd90_rate_pct", "tx_cnt"],
    )?;
    let dpd_income = load_csv(
        &data_dir.join("dpd90_by_income_band.csv"),
        &["income_band", "dpd90_rate_pct", "tx_cnt"],
    )?;
    let dpd_month = parse_month(
        load_csv(
            &data_dir.join("dpd90_by_tx_month.csv"),
            &["tx_month", "dpd90_rate_pct", "tx_cnt"],
        )?,
        "tx_month",
    );
    let vintage = load_csv(
        &data_dir.join("vintage_curves_cumulative.csv"),
        &["cohort_month", "month_plus", "dpd90_cum_pct"],
    )?;

    if let Some(t) = &new_customers {
        render_line(
            t,
            "month",
            "new_customers",
            "New customers by month",
            &out_dir.join("new_customers_by_month.png"),
            &opts,
        )?;
    }
    if let Some(t) = &active_customers {
        render_line(
            t,
            "month",
            "active_customers",
            "Active customers by month",
            &out_dir.join("active_customers_by_month.png"),
            &opts,
        )?;
    }
    if let Some(t) = &tx_volume {
        render_bar(
            t,
            "month",
            "tx_count",
            "Transactions count by month",
            &out_dir.join("tx_count_by_month.png"),
            &opts,
        )?;
        render_line(
            t,
            "month",
            "tx_amount",
            "Transactions amount by month",
            &out_dir.join("tx_amount_by_month.png"),
            &opts,
        )?;
    }
    if let Some(t) = &installments {
        render_stacked_shares(
            t,
            "month",
            "installments_count",
            "share_pct",
            "Installments share by month",
            &out_dir.join("installments_share_by_month.png"),
            &opts,
        )?;
    }
    if let Some(t) = &dpd_age {
        render_bar(
            t,
            "age_band",
            "dpd90_rate_pct",
            "DPD90 rate by age band",
            &out_dir.join("dpd90_by_age_band.png"),
            &opts,
        )?;
    }
    if let Some(t) = &dpd_income {
        render_bar(
            t,
            "income_band",
            "dpd90_rate_pct",
            "DPD90 rate by income band",
            &out_dir.join("dpd90_by_income_band.png"),
            &opts,
        )?;
    }
    if let Some(t) = &dpd_month {
        render_line(
            t,
            "tx_month",
            "dpd90_rate_pct",
            "DPD90 rate by transaction month",
            &out_dir.join("dpd90_by_tx_month.png"),
            &opts,
        )?;
    }
    if let Some(t) = &vintage {
        render_vintage_curves(t, out_dir, &opts)?;
    }

    info!(dir = %out_dir.display(), "all plots saved");
    Ok(())
}

fn render_vintage_curves(table: &Table, out_dir: &Path, opts: &RenderOptions) -> Result<()> {
    // Gate before the column lookup: an empty export skips cleanly even
    // when its header has drifted away from cohort_month.
    if table.is_empty() {
        info!("no vintage rows, curves skipped");
        return Ok(());
    }
    for cohort in cohorts(table)? {
        let label = cohort.label();
        let slice = cohort_slice(table, &cohort);
        render_line(
            &slice,
            "month_plus",
            "dpd90_cum_pct",
            &format!("Vintage curve - cohort {label}"),
            &out_dir.join(format!("vintage_curve_{label}.png")),
            opts,
        )?;
    }
    Ok(())
}

/// Distinct non-null cohort keys, ascending, capped to the first
/// [`MAX_VINTAGE_COHORTS`].
fn cohorts(table: &Table) -> Result<Vec<Value>> {
    let column = table
        .column("cohort_month")
        .ok_or_else(|| PlotError::missing_column("cohort_month", &table.headers))?;
    let mut cohorts: Vec<Value> = column
        .into_iter()
        .filter(|v| !v.is_null())
        .cloned()
        .collect();
    cohorts.sort_by(|a, b| a.compare(b));
    cohorts.dedup_by(|a, b| a.compare(b) == Ordering::Equal);
    cohorts.truncate(MAX_VINTAGE_COHORTS);
    Ok(cohorts)
}

/// Rows of one cohort, ordered by `month_plus` so the curve runs left to
/// right regardless of export order.
fn cohort_slice(table: &Table, cohort: &Value) -> Table {
    let key = table.column_index("cohort_month");
    let mut rows: Vec<Vec<Value>> = table
        .rows
        .iter()
        .filter(|row| key.and_then(|i| row.get(i)) == Some(cohort))
        .cloned()
        .collect();
    if let Some(offset) = table.column_index("month_plus") {
        rows.sort_by(|a, b| {
            let av = a.get(offset).unwrap_or(&Value::Null);
            let bv = b.get(offset).unwrap_or(&Value::Null);
            av.compare(bv)
        });
    }
    Table {
        headers: table.headers.clone(),
        rows,
    }
}
