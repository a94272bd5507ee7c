use anyhow::{Context, Result, anyhow};
use clap::Parser;
use models::Holding;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(
    name = "validate-holdings",
    about = "Data quality report for exported holdings files."
)]
struct Args {
    /// Directory holding the exported CSV files
    #[arg(short, long, default_value = "output")]
    dir: PathBuf,
}

/// Latest file in `dir` whose name starts with `prefix` and ends in `.csv`.
///
/// Names carry a YYYYMMDD stamp, so the lexically greatest one is the newest.
fn latest_export(dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if name.starts_with(prefix) && name.ends_with(".csv") {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches.pop())
}

fn load(dir: &Path, prefix: &str) -> Result<Option<(PathBuf, Vec<Holding>)>> {
    match latest_export(dir, prefix)? {
        Some(path) => {
            let holdings = utils::read_holdings_csv(&path)?;
            Ok(Some((path, holdings)))
        }
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    logger::init("utils=warn");
    let args = Args::parse();

    if !args.dir.exists() {
        return Err(anyhow!("output directory not found: {}", args.dir.display()));
    }

    let equity = load(&args.dir, "equity_holdings_")?;
    let debt = load(&args.dir, "debt_holdings_")?;
    let all = load(&args.dir, "all_holdings_")?;

    if equity.is_none() && debt.is_none() && all.is_none() {
        return Err(anyhow!(
            "no exported holdings files in {}",
            args.dir.display()
        ));
    }

    for (label, file) in [("EQUITY", &equity), ("DEBT", &debt), ("ALL", &all)] {
        if let Some((path, holdings)) = file {
            println!("File: {}", path.display());
            println!("{}\n", utils::quality_report(label, holdings).render());
        }
    }

    if let (Some((_, eq)), Some((_, dt))) = (&equity, &debt) {
        println!("{}", utils::insights(eq, dt).render());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_latest_export_picks_newest_stamp() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "equity_holdings_20251231.csv",
            "equity_holdings_20260131.csv",
            "all_holdings_20260131.csv",
            "equity_holdings_20260228.txt",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }

        let latest = latest_export(dir.path(), "equity_holdings_").unwrap().unwrap();
        assert_eq!(
            latest.file_name().and_then(|s| s.to_str()),
            Some("equity_holdings_20260131.csv")
        );
        assert!(latest_export(dir.path(), "debt_holdings_").unwrap().is_none());
    }
}
