// File: crates/plot-core/src/load.rs
// Summary: CSV ingestion: file -> typed Table, tolerant of absent inputs.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::table::{Table, Value};

/// Read one CSV export into a [`Table`].
///
/// A missing file is an expected condition (upstream jobs emit a varying
/// subset of tables), so it logs a warning and yields `Ok(None)`. Columns
/// named in `required` that the header lacks are also only warned about;
/// the caller fails later if it actually needs them. Unreadable or ragged
/// files are real errors.
pub fn load_csv(path: &Path, required: &[&str]) -> Result<Option<Table>> {
    if !path.exists() {
        warn!(file = %path.display(), "input table not found, skipping");
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !headers.iter().any(|h| h == name))
        .collect();
    if !missing.is_empty() {
        warn!(file = %path.display(), columns = ?missing, "expected columns are absent");
    }

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        table.push_row(record.iter().map(Value::parse).collect());
    }

    Ok(Some(table))
}
