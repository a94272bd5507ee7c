//! Data-quality checks over exported holdings.
//!
//! The report mirrors what a reviewer looks at before trusting a run: missing
//! values, ISIN coverage, weight distribution, the biggest positions and
//! suspicious duplicates.

use models::Holding;
use std::collections::{HashMap, HashSet};

/// Holdings above this weight are flagged as outliers.
pub const OUTLIER_PERCENTAGE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PercentageStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub above_outlier: usize,
}

impl PercentageStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        Some(Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean: sorted.iter().sum::<f64>() / n as f64,
            median,
            above_outlier: sorted.iter().filter(|v| **v > OUTLIER_PERCENTAGE).count(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsinStats {
    pub present: usize,
    pub absent: usize,
    pub invalid_length: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopHolding {
    pub scheme_name: String,
    pub instrument_name: String,
    pub portfolio_percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub label: String,
    pub total_records: usize,
    pub total_columns: usize,
    /// Columns with at least one missing value, with the count.
    pub missing: Vec<(&'static str, usize)>,
    pub unique_amcs: usize,
    pub unique_schemes: usize,
    pub unique_instruments: usize,
    pub instrument_types: usize,
    pub isin: IsinStats,
    pub percentage: Option<PercentageStats>,
    /// Up to 5 schemes with the most holdings.
    pub top_schemes: Vec<(String, usize)>,
    /// Up to 10 holdings with the highest weight.
    pub top_holdings: Vec<TopHolding>,
    /// Rows repeating an earlier (scheme, instrument) pair.
    pub duplicates: usize,
}

pub fn quality_report(label: &str, holdings: &[Holding]) -> QualityReport {
    let mut missing = Vec::new();
    let no_code = holdings.iter().filter(|h| h.instrument_code.is_none()).count();
    if no_code > 0 {
        missing.push(("instrument_code", no_code));
    }
    let no_isin = holdings.iter().filter(|h| h.isin.is_none()).count();
    if no_isin > 0 {
        missing.push(("isin", no_isin));
    }

    let isin = IsinStats {
        present: holdings.len() - no_isin,
        absent: no_isin,
        invalid_length: holdings
            .iter()
            .filter_map(|h| h.isin.as_ref())
            .filter(|isin| isin.chars().count() != 12)
            .count(),
    };

    let percentages: Vec<f64> = holdings.iter().map(|h| h.portfolio_percentage).collect();

    let mut top_holdings: Vec<&Holding> = holdings.iter().collect();
    top_holdings.sort_by(|a, b| b.portfolio_percentage.total_cmp(&a.portfolio_percentage));
    let top_holdings = top_holdings
        .into_iter()
        .take(10)
        .map(|h| TopHolding {
            scheme_name: h.scheme_name.clone(),
            instrument_name: h.instrument_name.clone(),
            portfolio_percentage: h.portfolio_percentage,
        })
        .collect();

    let pairs: HashSet<(&str, &str)> = holdings
        .iter()
        .map(|h| (h.scheme_name.as_str(), h.instrument_name.as_str()))
        .collect();

    QualityReport {
        label: label.to_string(),
        total_records: holdings.len(),
        total_columns: models::HOLDING_COLUMNS.len(),
        missing,
        unique_amcs: count_unique(holdings, |h| h.amc_name.as_str()),
        unique_schemes: count_unique(holdings, |h| h.scheme_name.as_str()),
        unique_instruments: count_unique(holdings, |h| h.instrument_name.as_str()),
        instrument_types: count_unique(holdings, |h| h.instrument_type.as_str()),
        isin,
        percentage: PercentageStats::from_values(&percentages),
        top_schemes: value_counts(holdings.iter().map(|h| h.scheme_name.as_str()), 5),
        top_holdings,
        duplicates: holdings.len() - pairs.len(),
    }
}

impl QualityReport {
    pub fn render(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = vec![
            rule.clone(),
            format!("DATA QUALITY REPORT - {}", self.label.to_uppercase()),
            rule.clone(),
            String::new(),
            "📏 Basic Statistics:".to_string(),
            format!("  Total Records: {}", self.total_records),
            format!("  Total Columns: {}", self.total_columns),
            String::new(),
            "🔍 Missing Value Analysis:".to_string(),
        ];
        for (column, count) in &self.missing {
            out.push(format!(
                "  {}: {} ({:.2}%)",
                column,
                count,
                share(*count, self.total_records)
            ));
        }

        out.push(String::new());
        out.push("📈 Unique Value Counts:".to_string());
        out.push(format!("  Unique AMCs: {}", self.unique_amcs));
        out.push(format!("  Unique Schemes: {}", self.unique_schemes));
        out.push(format!("  Unique Instruments: {}", self.unique_instruments));
        out.push(format!("  Instrument Types: {}", self.instrument_types));

        out.push(String::new());
        out.push("📋 ISIN Analysis:".to_string());
        out.push(format!(
            "  Records with ISIN: {} ({:.2}%)",
            self.isin.present,
            share(self.isin.present, self.total_records)
        ));
        out.push(format!(
            "  Records without ISIN: {} ({:.2}%)",
            self.isin.absent,
            share(self.isin.absent, self.total_records)
        ));
        if self.isin.invalid_length > 0 {
            out.push(format!("  ⚠ Invalid ISIN format: {}", self.isin.invalid_length));
        }

        if let Some(p) = &self.percentage {
            out.push(String::new());
            out.push("💰 Portfolio Percentage Analysis:".to_string());
            out.push(format!("  Min: {:.4}%", p.min));
            out.push(format!("  Max: {:.4}%", p.max));
            out.push(format!("  Mean: {:.4}%", p.mean));
            out.push(format!("  Median: {:.4}%", p.median));
            if p.above_outlier > 0 {
                out.push(format!("  ⚠ Holdings > {}%: {}", OUTLIER_PERCENTAGE, p.above_outlier));
            }
        }

        out.push(String::new());
        out.push("📑 Scheme-level Analysis:".to_string());
        out.push("  Top 5 schemes by holdings count:".to_string());
        for (scheme, count) in &self.top_schemes {
            out.push(format!("    - {}...: {} holdings", truncate(scheme, 50), count));
        }

        if !self.top_holdings.is_empty() {
            out.push(String::new());
            out.push("🏆 Top 10 Holdings by Percentage:".to_string());
            for h in &self.top_holdings {
                out.push(format!(
                    "    {:.2}% - {} ({})",
                    h.portfolio_percentage,
                    truncate(&h.instrument_name, 40),
                    truncate(&h.scheme_name, 30)
                ));
            }
        }

        if self.duplicates > 0 {
            out.push(String::new());
            out.push(format!(
                "⚠ Warning: {} potential duplicate holdings found",
                self.duplicates
            ));
        }

        out.push(String::new());
        out.push(rule);
        out.join("\n")
    }
}

/// Cross-type view over a run's equity and debt holdings.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub total_holdings: usize,
    pub equity_holdings: usize,
    pub debt_holdings: usize,
    /// Instruments held by the most schemes, with the holding count.
    pub popular_equity: Vec<(String, usize)>,
    pub popular_debt: Vec<(String, usize)>,
}

pub fn insights(equity: &[Holding], debt: &[Holding]) -> Insights {
    Insights {
        total_holdings: equity.len() + debt.len(),
        equity_holdings: equity.len(),
        debt_holdings: debt.len(),
        popular_equity: value_counts(equity.iter().map(|h| h.instrument_name.as_str()), 10),
        popular_debt: value_counts(debt.iter().map(|h| h.instrument_name.as_str()), 10),
    }
}

impl Insights {
    pub fn render(&self) -> String {
        let rule = "=".repeat(80);
        let mut out = vec![
            rule.clone(),
            "INVESTMENT INSIGHTS".to_string(),
            rule.clone(),
            String::new(),
            "📊 Overall Portfolio Statistics:".to_string(),
            format!("  Total Holdings: {}", self.total_holdings),
            format!(
                "  Equity Holdings: {} ({:.1}%)",
                self.equity_holdings,
                share(self.equity_holdings, self.total_holdings)
            ),
            format!(
                "  Debt Holdings: {} ({:.1}%)",
                self.debt_holdings,
                share(self.debt_holdings, self.total_holdings)
            ),
        ];

        if !self.popular_equity.is_empty() {
            out.push(String::new());
            out.push("🔝 Most Popular Equity Instruments:".to_string());
            for (name, count) in &self.popular_equity {
                out.push(format!("    {} schemes hold: {}", count, name));
            }
        }
        if !self.popular_debt.is_empty() {
            out.push(String::new());
            out.push("🔝 Most Popular Debt Instruments:".to_string());
            for (name, count) in &self.popular_debt {
                out.push(format!("    {} schemes hold: {}", count, truncate(name, 60)));
            }
        }

        out.push(String::new());
        out.push(rule);
        out.join("\n")
    }
}

fn count_unique<'a>(holdings: &'a [Holding], key: impl Fn(&'a Holding) -> &'a str) -> usize {
    holdings.iter().map(key).collect::<HashSet<_>>().len()
}

/// Occurrence counts, highest first (ties by name), limited to `limit` entries.
fn value_counts<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
        .into_iter()
        .take(limit)
        .map(|(v, c)| (v.to_string(), c))
        .collect()
}

fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models::InstrumentType;

    fn holding(scheme: &str, name: &str, isin: Option<&str>, pct: f64) -> Holding {
        Holding {
            amc_name: "Axis Mutual Fund".to_string(),
            scheme_name: scheme.to_string(),
            scheme_code: scheme.to_uppercase(),
            instrument_code: None,
            instrument_name: name.to_string(),
            instrument_type: InstrumentType::Equity,
            isin: isin.map(|s| s.to_string()),
            portfolio_percentage: pct,
            reporting_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
    }

    fn sample() -> Vec<Holding> {
        vec![
            holding("Fund A", "HDFC Bank", Some("INE040A01034"), 9.0),
            holding("Fund A", "Infosys", None, 3.0),
            holding("Fund B", "HDFC Bank", Some("INE040A01034"), 60.0),
            holding("Fund B", "HDFC Bank", Some("BAD"), 1.0),
        ]
    }

    #[test]
    fn test_percentage_stats() {
        let stats = PercentageStats::from_values(&[9.0, 3.0, 60.0, 1.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 60.0);
        assert_eq!(stats.mean, 18.25);
        assert_eq!(stats.median, 6.0);
        assert_eq!(stats.above_outlier, 1);

        let odd = PercentageStats::from_values(&[5.0, 1.0, 3.0]).unwrap();
        assert_eq!(odd.median, 3.0);
        assert_eq!(PercentageStats::from_values(&[]), None);
    }

    #[test]
    fn test_quality_report_counts() {
        let report = quality_report("Equity Holdings", &sample());

        assert_eq!(report.total_records, 4);
        assert_eq!(report.total_columns, 9);
        assert_eq!(report.missing, vec![("instrument_code", 4), ("isin", 1)]);
        assert_eq!(report.unique_amcs, 1);
        assert_eq!(report.unique_schemes, 2);
        assert_eq!(report.unique_instruments, 2);
        assert_eq!(report.instrument_types, 1);
        assert_eq!(
            report.isin,
            IsinStats {
                present: 3,
                absent: 1,
                invalid_length: 1
            }
        );
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.top_schemes, vec![("Fund A".to_string(), 2), ("Fund B".to_string(), 2)]);
        assert_eq!(report.top_holdings[0].portfolio_percentage, 60.0);
        assert_eq!(report.top_holdings.len(), 4);
    }

    #[test]
    fn test_quality_report_render() {
        let text = quality_report("Equity Holdings", &sample()).render();
        assert!(text.contains("DATA QUALITY REPORT - EQUITY HOLDINGS"));
        assert!(text.contains("isin: 1 (25.00%)"));
        assert!(text.contains("⚠ Invalid ISIN format: 1"));
        assert!(text.contains("Median: 6.0000%"));
        assert!(text.contains("60.00% - HDFC Bank (Fund B)"));
        assert!(text.contains("1 potential duplicate holdings"));
    }

    #[test]
    fn test_empty_report() {
        let report = quality_report("Debt Holdings", &[]);
        assert_eq!(report.percentage, None);
        assert_eq!(report.duplicates, 0);
        assert!(report.render().contains("Records with ISIN: 0 (0.00%)"));
    }

    #[test]
    fn test_insights() {
        let equity = sample();
        let debt = vec![holding("Fund C", "7.1% GOI 2034", None, 2.0)];
        let ins = insights(&equity, &debt);

        assert_eq!(ins.total_holdings, 5);
        assert_eq!(ins.popular_equity[0], ("HDFC Bank".to_string(), 3));
        assert_eq!(ins.popular_debt, vec![("7.1% GOI 2034".to_string(), 1)]);

        let text = ins.render();
        assert!(text.contains("Equity Holdings: 4 (80.0%)"));
        assert!(text.contains("3 schemes hold: HDFC Bank"));
    }
}
