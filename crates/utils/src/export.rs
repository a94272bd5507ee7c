use anyhow::{Context, Result};
use chrono::NaiveDate;
use models::{Holding, HOLDING_COLUMNS};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

/// Paths written by [`export_holdings`]. A file is only written when it has rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportedFiles {
    pub equity: Option<PathBuf>,
    pub debt: Option<PathBuf>,
    pub all: Option<PathBuf>,
}

/// Date stamp used in output file names, e.g. `20251231`.
pub fn file_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Writes holdings as UTF-8 CSV with a header row, even when `holdings` is empty.
///
/// Columns follow [`HOLDING_COLUMNS`]; absent optional fields are empty cells
/// and dates are written as `YYYY-MM-DD`.
pub fn write_holdings_csv<P: AsRef<Path>>(path: P, holdings: &[Holding]) -> Result<PathBuf> {
    let path = path.as_ref();

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("Cannot create holdings file at {:?}", path))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(HOLDING_COLUMNS)?;
    for holding in holdings {
        writer
            .serialize(holding)
            .with_context(|| format!("Writing holding '{}'", holding.instrument_name))?;
    }
    writer.flush()?;

    Ok(path.to_path_buf())
}

/// Reads a holdings CSV written by [`write_holdings_csv`].
pub fn read_holdings_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Holding>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Cannot open holdings file at {:?}", path))?;

    let mut out = Vec::new();
    for (idx, record) in reader.deserialize::<Holding>().enumerate() {
        let holding =
            record.with_context(|| format!("Invalid holding at row {} of {:?}", idx + 2, path))?;
        out.push(holding);
    }
    Ok(out)
}

/// Writes `equity_holdings_<stamp>.csv`, `debt_holdings_<stamp>.csv` and
/// `all_holdings_<stamp>.csv` (equity rows first) into `output_dir`.
pub fn export_holdings<P: AsRef<Path>>(
    output_dir: P,
    equity: &[Holding],
    debt: &[Holding],
    stamp: &str,
) -> Result<ExportedFiles> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {:?}", dir))?;

    let mut files = ExportedFiles::default();

    if !equity.is_empty() {
        let path = dir.join(format!("equity_holdings_{}.csv", stamp));
        files.equity = Some(write_holdings_csv(&path, equity)?);
        tracing::info!("Equity holdings saved: {} ({} rows)", path.display(), equity.len());
    }

    if !debt.is_empty() {
        let path = dir.join(format!("debt_holdings_{}.csv", stamp));
        files.debt = Some(write_holdings_csv(&path, debt)?);
        tracing::info!("Debt holdings saved: {} ({} rows)", path.display(), debt.len());
    }

    if !equity.is_empty() || !debt.is_empty() {
        let combined: Vec<Holding> = equity.iter().chain(debt.iter()).cloned().collect();
        let path = dir.join(format!("all_holdings_{}.csv", stamp));
        files.all = Some(write_holdings_csv(&path, &combined)?);
        tracing::info!("Combined holdings saved: {} ({} rows)", path.display(), combined.len());
    }

    Ok(files)
}
