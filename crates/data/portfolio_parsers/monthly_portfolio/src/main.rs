use anyhow::{anyhow, Context, Result};
use clap::Parser;
use monthly_portfolio::{Consolidation, MonthlyPortfolioParser};
use std::{
    fs,
    path::{Path, PathBuf},
};
use utils::{ConsolidationSummary, ExportedFiles};

/// Consolidates a monthly portfolio workbook into equity / debt holdings CSV files.
#[derive(Debug, Parser)]
#[command(name = "monthly_portfolio", author, version, long_about = None)]
struct Args {
    /// Workbook to parse. If omitted, the first *portfolio*.xlsx/.xls in the
    /// current directory is used.
    input: Option<PathBuf>,

    /// Directory for the CSV files and summary.txt
    #[arg(short = 'o', long = "output", default_value = "output")]
    output_dir: PathBuf,

    /// Path to settings.json (optional). Falls back to ./settings.json, then built-in defaults
    #[arg(short = 's', long = "settings")]
    settings_path: Option<PathBuf>,

    /// Override the AMC name stamped on every holding
    #[arg(long = "amc")]
    amc_name: Option<String>,
}

fn main() -> Result<()> {
    logger::init("monthly_portfolio=info,utils=info");
    let args = Args::parse();

    let input = match args.input {
        Some(path) => path,
        None => discover_workbook()?,
    };
    if !input.exists() {
        return Err(anyhow!("Workbook '{}' not found", input.display()));
    }

    let settings = settings_loader::load_settings_with_fallback(args.settings_path.as_ref())?;
    let mut parser = MonthlyPortfolioParser::new(settings);
    if let Some(amc) = args.amc_name {
        parser = parser.with_amc_name(amc);
    }

    println!("📖 Parsing {}", input.display());
    let result = parser
        .parse_file(&input)
        .with_context(|| format!("Failed parsing {}", input.display()))?;

    println!(
        "✓ Processed {}/{} schemes: {} equity, {} debt holdings",
        result.processed,
        result.scheme_count,
        result.equity.len(),
        result.debt.len()
    );
    if !result.skipped.is_empty() {
        println!("⚠️  Skipped {} sheet(s):", result.skipped.len());
        for skipped in &result.skipped {
            println!("   • {}: {}", skipped.scheme_code, skipped.reason);
        }
    }

    let summary = ConsolidationSummary::new(
        &parser.settings.amc_name,
        result.reporting_date,
        result.scheme_count,
        &result.equity,
        &result.debt,
    );
    let stamp = utils::file_stamp(chrono::Local::now().date_naive());
    let (files, summary_path) = write_outputs(&args.output_dir, &result, &summary, &stamp)?;

    if files.all.is_none() {
        println!("❌ No holdings found, no CSV files written.");
    } else {
        println!("\n📊 Output files:");
        println!("─────────────────────────────────────────");
        for path in [&files.equity, &files.debt, &files.all].into_iter().flatten() {
            println!("✓ {}", path.display());
        }
    }

    println!("\n{}", summary.render());
    println!("✅ Summary written to: {}", summary_path.display());

    Ok(())
}

/// Exports the holdings CSV files (only when there are holdings) and always
/// writes `summary.txt`.
fn write_outputs(
    output_dir: &Path,
    result: &Consolidation,
    summary: &ConsolidationSummary,
    stamp: &str,
) -> Result<(ExportedFiles, PathBuf)> {
    let files = if result.total_holdings() == 0 {
        ExportedFiles::default()
    } else {
        utils::export_holdings(output_dir, &result.equity, &result.debt, stamp)?
    };
    let summary_path = summary.write(output_dir)?;
    Ok((files, summary_path))
}

fn discover_workbook() -> Result<PathBuf> {
    println!("📂 No workbook specified, scanning current directory...");
    let mut found = Vec::new();
    for entry in fs::read_dir(".").context("Cannot read current directory")? {
        let path = entry?.path();
        if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
            let name_lower = name.to_lowercase();
            if name_lower.contains("portfolio")
                && (name_lower.ends_with(".xlsx") || name_lower.ends_with(".xls"))
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
        .into_iter()
        .next()
        .ok_or_else(|| {
            anyhow!("No portfolio workbook found. Expected *portfolio*.xlsx or an explicit path.")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn empty_run() -> Consolidation {
        Consolidation {
            equity: Vec::new(),
            debt: Vec::new(),
            reporting_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            scheme_count: 2,
            processed: 0,
            skipped: Vec::new(),
            unindexed_sheets: Vec::new(),
        }
    }

    #[test]
    fn test_summary_written_without_holdings() {
        let dir = tempfile::tempdir().unwrap();
        let result = empty_run();
        let summary = ConsolidationSummary::new(
            "Axis Mutual Fund",
            result.reporting_date,
            result.scheme_count,
            &result.equity,
            &result.debt,
        );

        let (files, summary_path) =
            write_outputs(dir.path(), &result, &summary, "20251231").unwrap();

        assert_eq!(files, ExportedFiles::default());
        assert_eq!(summary_path, dir.path().join(utils::summary::SUMMARY_FILE));
        let text = fs::read_to_string(&summary_path).unwrap();
        assert!(text.contains("Total Schemes: 2"));
        assert!(!text.contains("EQUITY HOLDINGS"));

        let csv_count = fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref().unwrap().path().extension().and_then(|x| x.to_str()) == Some("csv")
            })
            .count();
        assert_eq!(csv_count, 0);
    }
}
