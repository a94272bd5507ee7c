use anyhow::{Context, Result};
use chrono::NaiveDate;
use models::Holding;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

pub const SUMMARY_FILE: &str = "summary.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSummary {
    pub total_holdings: usize,
    pub unique_instruments: usize,
    pub schemes: usize,
}

impl TypeSummary {
    /// `None` for an empty set, so empty asset classes drop out of the report.
    pub fn from_holdings(holdings: &[Holding]) -> Option<Self> {
        if holdings.is_empty() {
            return None;
        }
        let instruments: HashSet<&str> =
            holdings.iter().map(|h| h.instrument_name.as_str()).collect();
        let schemes: HashSet<&str> = holdings.iter().map(|h| h.scheme_name.as_str()).collect();
        Some(Self {
            total_holdings: holdings.len(),
            unique_instruments: instruments.len(),
            schemes: schemes.len(),
        })
    }
}

/// Run-level overview printed after a consolidation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationSummary {
    pub amc_name: String,
    pub reporting_date: NaiveDate,
    pub total_schemes: usize,
    pub equity: Option<TypeSummary>,
    pub debt: Option<TypeSummary>,
}

impl ConsolidationSummary {
    pub fn new(
        amc_name: &str,
        reporting_date: NaiveDate,
        total_schemes: usize,
        equity: &[Holding],
        debt: &[Holding],
    ) -> Self {
        Self {
            amc_name: amc_name.to_string(),
            reporting_date,
            total_schemes,
            equity: TypeSummary::from_holdings(equity),
            debt: TypeSummary::from_holdings(debt),
        }
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(80);
        let mut lines = vec![
            rule.clone(),
            "PORTFOLIO CONSOLIDATION SUMMARY".to_string(),
            rule.clone(),
            format!("AMC Name: {}", self.amc_name),
            format!("Reporting Date: {}", self.reporting_date.format("%Y-%m-%d")),
            format!("Total Schemes: {}", self.total_schemes),
            String::new(),
        ];

        if let Some(eq) = &self.equity {
            lines.push("EQUITY HOLDINGS:".to_string());
            lines.push(format!("  Total Holdings: {}", eq.total_holdings));
            lines.push(format!("  Unique Instruments: {}", eq.unique_instruments));
            lines.push(format!("  Schemes with Equity: {}", eq.schemes));
        }

        if let Some(dt) = &self.debt {
            lines.push("\nDEBT HOLDINGS:".to_string());
            lines.push(format!("  Total Holdings: {}", dt.total_holdings));
            lines.push(format!("  Unique Instruments: {}", dt.unique_instruments));
            lines.push(format!("  Schemes with Debt: {}", dt.schemes));
        }

        lines.push(rule);
        lines.join("\n")
    }

    /// Writes the rendered summary to `<output_dir>/summary.txt`.
    pub fn write<P: AsRef<Path>>(&self, output_dir: P) -> Result<PathBuf> {
        let dir = output_dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(SUMMARY_FILE);
        fs::write(&path, self.render())
            .with_context(|| format!("Cannot write summary at {:?}", path))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::InstrumentType;

    fn holding(scheme: &str, name: &str, kind: InstrumentType) -> Holding {
        Holding {
            amc_name: "Axis Mutual Fund".to_string(),
            scheme_name: scheme.to_string(),
            scheme_code: scheme.to_uppercase(),
            instrument_code: None,
            instrument_name: name.to_string(),
            instrument_type: kind,
            isin: None,
            portfolio_percentage: 1.0,
            reporting_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }

    #[test]
    fn test_type_summary_counts() {
        let rows = vec![
            holding("Fund A", "HDFC Bank", InstrumentType::Equity),
            holding("Fund B", "HDFC Bank", InstrumentType::Equity),
            holding("Fund B", "Infosys", InstrumentType::Equity),
        ];
        let summary = TypeSummary::from_holdings(&rows).unwrap();
        assert_eq!(summary.total_holdings, 3);
        assert_eq!(summary.unique_instruments, 2);
        assert_eq!(summary.schemes, 2);
        assert_eq!(TypeSummary::from_holdings(&[]), None);
    }

    #[test]
    fn test_render_omits_empty_types() {
        let equity = vec![holding("Fund A", "HDFC Bank", InstrumentType::Equity)];
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let text = ConsolidationSummary::new("Axis Mutual Fund", date, 3, &equity, &[]).render();

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("AMC Name: Axis Mutual Fund"));
        assert!(text.contains("Reporting Date: 2025-12-31"));
        assert!(text.contains("Total Schemes: 3"));
        assert!(text.contains("Schemes with Equity: 1"));
        assert!(!text.contains("DEBT HOLDINGS"));
    }

    #[test]
    fn test_write_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let summary = ConsolidationSummary::new("Axis Mutual Fund", date, 0, &[], &[]);

        let path = summary.write(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(SUMMARY_FILE));
        assert_eq!(fs::read_to_string(path).unwrap(), summary.render());
    }
}
