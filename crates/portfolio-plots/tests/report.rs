// File: crates/portfolio-plots/tests/report.rs
// Purpose: End-to-end report runs over synthetic CSV exports.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use portfolio_plots::report::run;
use tempfile::tempdir;

fn write_csv(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("write csv");
}

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read out dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn empty_input_dir_still_succeeds() {
    let input = tempdir().expect("tempdir");
    let out = input.path().join("plots");
    run(input.path(), &out).expect("run");
    assert!(out.is_dir());
    assert!(png_names(&out).is_empty());
}

#[test]
fn nested_output_dir_is_created() {
    let input = tempdir().expect("tempdir");
    let out = input.path().join("deep").join("nested").join("plots");
    run(input.path(), &out).expect("run");
    assert!(out.is_dir());
}

#[test]
fn representative_export_renders_every_chart() {
    let input = tempdir().expect("tempdir");
    let dir = input.path();

    write_csv(
        dir,
        "new_customers_by_month.csv",
        "month,new_customers\n2023-01,10\n2023-02,14\n2023-03,9\n",
    );
    write_csv(
        dir,
        "transactions_volume_by_month.csv",
        "month,tx_count,tx_amount\n2023-01,100,2500.5\n2023-02,140,3900.25\n",
    );
    write_csv(
        dir,
        "installments_breakdown_by_month.csv",
        "month,installments_count,share_pct\n\
         2023-01,1,55\n2023-01,3,45\n2023-02,1,40\n2023-02,3,60\n",
    );
    write_csv(
        dir,
        "merchant_categories_by_month.csv",
        "month,category,tx_cnt\n2023-01,groceries,500\n",
    );
    write_csv(
        dir,
        "dpd90_by_age_band.csv",
        "age_band,dpd90_rate_pct,tx_cnt\n18-25,9.5,1200\n26-35,6.1,3400\n36-50,4.8,2100\n",
    );
    write_csv(
        dir,
        "dpd90_by_tx_month.csv",
        "tx_month,dpd90_rate_pct,tx_cnt\n2023-01,5.5,100\n2023-02,4.9,140\n",
    );
    // Ten cohorts; only the earliest eight may produce curves.
    let mut vintage = String::from("cohort_month,month_plus,dpd90_cum_pct\n");
    for cohort in 1..=10 {
        for offset in 0..3 {
            writeln!(
                vintage,
                "2023-{cohort:02},{offset},{rate}",
                rate = 0.5 * (offset + 1) as f64
            )
            .unwrap();
        }
    }
    write_csv(dir, "vintage_curves_cumulative.csv", &vintage);

    let out = dir.join("plots");
    run(dir, &out).expect("run");

    let mut expected: Vec<String> = vec![
        "dpd90_by_age_band.png".into(),
        "dpd90_by_tx_month.png".into(),
        "installments_share_by_month.png".into(),
        "new_customers_by_month.png".into(),
        "tx_amount_by_month.png".into(),
        "tx_count_by_month.png".into(),
    ];
    for cohort in 1..=8 {
        expected.push(format!("vintage_curve_2023-{cohort:02}.png"));
    }
    expected.sort();

    // Absent tables stay absent, the merchant table draws nothing, and the
    // cohort cap holds.
    assert_eq!(png_names(&out), expected);
}

#[test]
fn header_only_table_renders_no_chart() {
    let input = tempdir().expect("tempdir");
    write_csv(
        input.path(),
        "active_customers_by_month.csv",
        "month,active_customers\n",
    );
    let out = input.path().join("plots");
    run(input.path(), &out).expect("run");
    assert!(png_names(&out).is_empty());
}

#[test]
fn empty_vintage_table_is_skipped_even_with_drifted_header() {
    let input = tempdir().expect("tempdir");
    // Header-only file whose header also lost the cohort_month column: the
    // zero-row gate must fire before any column lookup can turn fatal.
    write_csv(
        input.path(),
        "vintage_curves_cumulative.csv",
        "cohort,month_plus,dpd90_cum_pct\n",
    );
    let out = input.path().join("plots");
    run(input.path(), &out).expect("run");
    assert!(png_names(&out).is_empty());
}

#[test]
fn missing_needed_column_aborts() {
    let input = tempdir().expect("tempdir");
    write_csv(
        input.path(),
        "new_customers_by_month.csv",
        "month,customers\n2023-01,10\n",
    );
    let out = input.path().join("plots");
    assert!(run(input.path(), &out).is_err());
}

#[test]
fn duplicate_share_rows_abort() {
    let input = tempdir().expect("tempdir");
    write_csv(
        input.path(),
        "installments_breakdown_by_month.csv",
        "month,installments_count,share_pct\n2023-01,1,55\n2023-01,1,45\n",
    );
    let out = input.path().join("plots");
    assert!(run(input.path(), &out).is_err());
}

#[test]
fn unsorted_vintage_rows_still_render() {
    let input = tempdir().expect("tempdir");
    write_csv(
        input.path(),
        "vintage_curves_cumulative.csv",
        "cohort_month,month_plus,dpd90_cum_pct\n\
         2023-01,2,1.5\n2023-01,0,0.5\n2023-01,1,1.0\n",
    );
    let out = input.path().join("plots");
    run(input.path(), &out).expect("run");
    assert_eq!(png_names(&out), vec!["vintage_curve_2023-01.png"]);
}
